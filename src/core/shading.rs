// Host-side mirrors of the shader math in shaders/*.wgsl. The GPU programs are the
// source of truth for pixels; these functions keep the numerics testable.

use crate::core::constants::{GRAVITY, WATER_TIME_SCALE};
use crate::core::easing::smoothstep;
use glam::{Vec2, Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};
use std::f32::consts::TAU;

/// One Gerstner wave: horizontal direction, steepness and wavelength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    pub direction: Vec2,
    pub steepness: f32,
    pub wavelength: f32,
}

impl WaveParams {
    pub const fn new(dx: f32, dz: f32, steepness: f32, wavelength: f32) -> Self {
        Self {
            direction: Vec2::new(dx, dz),
            steepness,
            wavelength,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.direction.x, self.direction.y, self.steepness, self.wavelength]
    }
}

pub const WATER_WAVES: [WaveParams; 3] = [
    WaveParams::new(1.0, 0.2, 0.02, 12.0),
    WaveParams::new(0.7, 0.7, 0.03, 5.0),
    WaveParams::new(-0.2, 1.0, 0.04, 2.0),
];

/// Displacement of `p` by one wave; accumulates the surface tangent and binormal.
pub fn gerstner_wave(
    wave: &WaveParams,
    p: Vec3,
    time: f32,
    tangent: &mut Vec3,
    binormal: &mut Vec3,
) -> Vec3 {
    let s = wave.steepness;
    let k = TAU / wave.wavelength.max(f32::EPSILON);
    let c = (GRAVITY / k).sqrt();
    let d = wave.direction.normalize_or_zero();
    let f = k * (d.dot(Vec2::new(p.x, p.z)) - c * time * WATER_TIME_SCALE);
    let a = s / k;
    let (sin_f, cos_f) = f.sin_cos();

    *tangent += Vec3::new(-d.x * d.x * (s * sin_f), d.x * (s * cos_f), -d.x * d.y * (s * sin_f));
    *binormal += Vec3::new(-d.x * d.y * (s * sin_f), d.y * (s * cos_f), -d.y * d.y * (s * sin_f));
    Vec3::new(d.x * (a * cos_f), a * sin_f, d.y * (a * cos_f))
}

/// Displaced position and surface normal of a flat grid point after all waves.
pub fn water_surface(waves: &[WaveParams], p: Vec3, time: f32) -> (Vec3, Vec3) {
    let mut tangent = Vec3::X;
    let mut binormal = Vec3::Z;
    let mut out = p;
    for w in waves {
        out += gerstner_wave(w, p, time, &mut tangent, &mut binormal);
    }
    (out, binormal.cross(tangent).normalize_or_zero())
}

#[inline]
pub fn fresnel_schlick(cos_theta: f32, f0: f32) -> f32 {
    f0 + (1.0 - f0) * (1.0 - cos_theta.clamp(0.0, 1.0)).powi(5)
}

/// Water opacity: a fixed base plus the reflective share at grazing angles.
#[inline]
pub fn water_alpha(fresnel: f32) -> f32 {
    (0.5 + fresnel * 0.5).clamp(0.0, 1.0)
}

/// Blinn-Phong exponent for a perceptual roughness, clamped to a usable range.
#[inline]
pub fn specular_exponent(roughness: f32) -> f32 {
    (2.0 / roughness.max(1e-3).powi(4) - 2.0).clamp(10.0, 200.0)
}

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

/// 3D simplex noise, roughly in [-1, 1]. Drives the water micro ripples.
pub fn simplex3(v: Vec3) -> f32 {
    const CX: f32 = 1.0 / 6.0;
    const CY: f32 = 1.0 / 3.0;
    let i = (v + Vec3::splat(v.dot(Vec3::splat(CY)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(CX)));

    let g = Vec3::select(x0.cmpge(x0.yzx()), Vec3::ONE, Vec3::ZERO);
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());
    let x1 = x0 - i1 + Vec3::splat(CX);
    let x2 = x0 - i2 + Vec3::splat(CY);
    let x3 = x0 - Vec3::splat(0.5);

    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients on a 7x7 grid mapped onto an octahedron.
    let n_ = 0.142_857_15_f32;
    let ns = Vec3::new(2.0 * n_, 0.5 * n_ - 1.0, n_);
    let j = p - 49.0 * (p * ns.z * ns.z).floor();
    let x_ = (j * ns.z).floor();
    let y_ = (j - 7.0 * x_).floor();
    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);
    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -Vec4::select(Vec4::ZERO.cmpge(h), Vec4::ONE, Vec4::ZERO);
    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let p0 = Vec3::new(a0.x, a0.y, h.x);
    let p1 = Vec3::new(a0.z, a0.w, h.y);
    let p2 = Vec3::new(a1.x, a1.y, h.z);
    let p3 = Vec3::new(a1.z, a1.w, h.w);
    let norm = Vec4::splat(1.792_842_9)
        - 0.853_734_7 * Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3));
    let (p0, p1, p2, p3) = (p0 * norm.x, p1 * norm.y, p2 * norm.z, p3 * norm.w);

    let m = (Vec4::splat(0.5) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;
    105.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

/// Two counter-moving ripple layers at a world position; the second at twice the scale.
pub fn ripple_noise(world_xz: Vec2, time: f32) -> (f32, f32) {
    let scale = 5.0;
    let drift = Vec2::splat(time * 0.1);
    let n1 = simplex3((world_xz * scale + drift).extend(time * 0.1));
    let n2 = simplex3((world_xz * scale * 2.0 - drift).extend(time * 0.1));
    (n1, n2)
}

/// Geometric normal nudged equally on every axis by the summed ripples.
pub fn ripple_normal(normal: Vec3, n1: f32, n2: f32) -> Vec3 {
    (normal + Vec3::splat(n1 + n2) * 0.08).normalize_or_zero()
}

/// Base colour plus sun specular, then the sky reflection for upward normals. Clamped.
pub fn water_compose(base: Vec3, specular: f32, sky: Vec3, fresnel: f32, normal_y: f32) -> Vec3 {
    let mut color = base + Vec3::new(1.0, 0.95, 0.8) * specular;
    if normal_y > 0.0 {
        color = color.lerp(sky, fresnel);
    }
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

// --- clouds ---

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn fract2(v: Vec2) -> Vec2 {
    v - v.floor()
}

pub fn cloud_hash(p: Vec2) -> f32 {
    let mut p = fract2(p * Vec2::new(123.34, 456.21));
    p += Vec2::splat(p.dot(p + 45.32));
    fract(p.x * p.y)
}

/// Bilinear value noise with smoothstep weights.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let a = cloud_hash(i);
    let b = cloud_hash(i + Vec2::X);
    let c = cloud_hash(i + Vec2::Y);
    let d = cloud_hash(i + Vec2::ONE);
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    a + (b - a) * u.x + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

pub const FBM_OCTAVES: u32 = 5;

/// Each octave triples the frequency and halves the amplitude.
pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..FBM_OCTAVES {
        value += amplitude * value_noise(p);
        p += p * 2.0;
        amplitude *= 0.5;
    }
    value
}

/// Combined two-layer cloud noise at `uv` and shader time.
pub fn cloud_noise(uv: Vec2, time: f32, speed: f32) -> f32 {
    let t = time * speed * 0.1;
    let p = uv * 6.0;
    let n1 = fbm(p + Vec2::new(t * 0.4, t * 0.1));
    let n2 = fbm(p * 2.0 + Vec2::new(t * 0.2, t * 0.05) + Vec2::splat(n1));
    n1 + (n2 - n1) * 0.6
}

/// Final cloud alpha: noise threshold, density, radial edge fade.
pub fn cloud_alpha(uv: Vec2, noise: f32, density: f32) -> f32 {
    let alpha = (smoothstep(0.2, 0.7, noise) * density * 3.0).clamp(0.0, 1.0);
    let edge = smoothstep(0.5, 0.4, uv.distance(Vec2::splat(0.5)));
    alpha * edge * 0.9
}

// --- city ---

/// Projection plane for the window grid, chosen by the dominant normal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridPlane {
    /// Faces pointing along X use world ZY.
    Zy,
    /// Roofs and floors use world XZ.
    Xz,
    /// Everything else uses world XY.
    Xy,
}

pub fn grid_plane(normal: Vec3) -> GridPlane {
    let n = normal.abs();
    if n.x > n.y && n.x > n.z {
        GridPlane::Zy
    } else if n.y > n.x && n.y > n.z {
        GridPlane::Xz
    } else {
        GridPlane::Xy
    }
}

/// Window-grid coordinates of a world position on a face with `normal`;
/// `scale` is windows per world unit.
pub fn grid_coords(world: Vec3, normal: Vec3, scale: f32) -> Vec2 {
    let uv = match grid_plane(normal) {
        GridPlane::Zy => Vec2::new(world.z, world.y),
        GridPlane::Xz => Vec2::new(world.x, world.z),
        GridPlane::Xy => Vec2::new(world.x, world.y),
    };
    uv * scale
}

#[inline]
pub fn hash_sin(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.5453)
}

/// 1 inside the window rectangle of a grid cell, 0 on the wall margin.
pub fn window_mask(cell: Vec2, window_size: f32) -> f32 {
    let size = Vec2::new(window_size * 0.8, 0.7);
    let margin = (Vec2::ONE - size) * 0.5;
    let step = |edge: f32, x: f32| if x >= edge { 1.0 } else { 0.0 };
    step(margin.x, cell.x)
        * step(margin.y, cell.y)
        * step(cell.x, 1.0 - margin.x)
        * step(cell.y, 1.0 - margin.y)
}

/// Roofs never get windows, and roughly a fifth of the wall cells stay dark.
pub fn city_window_visible(normal: Vec3, tile: Vec2) -> bool {
    normal.abs().y <= 0.6 && hash_sin(tile) <= 0.8
}

/// Wall colour with a height gradient and per-tile brightness jitter.
///
/// `local_y` is the object-space height, so moving the city mesh does not shift the gradient.
pub fn city_wall_color(low: Vec3, high: Vec3, local_y: f32, tile: Vec2) -> Vec3 {
    let base = low.lerp(high, smoothstep(-10.0, 50.0, local_y));
    base * (0.95 + 0.1 * hash_sin(tile + Vec2::ONE))
}

#[inline]
pub fn fog_factor(distance: f32, near: f32, far: f32) -> f32 {
    smoothstep(near, far, distance)
}

/// Half-lambert style term used by the city and lit materials.
#[inline]
pub fn soft_diffuse(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.dot(light_dir.normalize_or_zero()).max(0.0) * 0.5 + 0.65
}
