// Camera description shared by every scene; platform agnostic.

use crate::core::timeline::Transform;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Perspective camera placed by position and orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            aspect,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    /// Place the camera from a timeline transform (Euler XYZ rotation).
    pub fn set_transform(&mut self, t: &Transform) {
        self.position = t.position;
        self.orientation = euler_xyz(t.rotation);
    }

    /// Aim from `position` toward `target`, keeping +Y up.
    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        let view = Mat4::look_at_rh(position, target, Vec3::Y);
        let (_, rot, _) = view.inverse().to_scale_rotation_translation();
        self.orientation = rot;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Clip-space projection.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position).inverse()
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[inline]
pub fn euler_xyz(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Map a client-space pointer position to [-1, 1] x [-1, 1] with +Y up.
#[inline]
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
        return Vec2::ZERO;
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = -(y / height) * 2.0 + 1.0;
    Vec2::new(nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
}
