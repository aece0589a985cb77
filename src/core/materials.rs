// Uniform blocks for each material kind. Every block is vec4-aligned so the WGSL
// struct layouts match without manual padding.

use crate::core::constants::{BLOOM_STRENGTH, BLOOM_THRESHOLD};
use crate::core::preloader::LoaderDrive;
use crate::core::shading::WATER_WAVES;
use glam::{Mat4, Vec3};

/// Parse `#rrggbb` (or `rrggbb`) into linear-ish 0..1 RGB.
pub fn hex_rgb(s: &str) -> Option<[f32; 3]> {
    let s = s.trim().trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok().map(|v| v as f32 / 255.0);
    Some([channel(0)?, channel(2)?, channel(4)?])
}

fn hex4(s: &str, w: f32) -> [f32; 4] {
    let [r, g, b] = hex_rgb(s).unwrap_or([1.0, 0.0, 1.0]);
    [r, g, b, w]
}

fn dir4(v: Vec3, w: f32) -> [f32; 4] {
    let n = v.normalize_or_zero();
    [n.x, n.y, n.z, w]
}

/// Which pipeline a draw goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Lit,
    City,
    Water,
    Cloud,
    Loader,
}

impl MaterialKind {
    pub fn is_transparent(self) -> bool {
        matches!(self, MaterialKind::Water | MaterialKind::Cloud)
    }
}

/// Per-frame values shared by every draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    /// xyz camera position, w shader time in seconds.
    pub camera: [f32; 4],
    /// xy framebuffer size in pixels, zw pointer in NDC.
    pub screen: [f32; 4],
}

impl Globals {
    pub fn new(view_proj: Mat4, camera_pos: Vec3, time: f32, size: (u32, u32), mouse: [f32; 2]) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera: [camera_pos.x, camera_pos.y, camera_pos.z, time],
            screen: [size.0 as f32, size.1 as f32, mouse[0], mouse[1]],
        }
    }
}

/// Object-to-world matrix, one per draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LitParams {
    pub color: [f32; 4],
    /// xyz direction toward the sun, w ambient term.
    pub sun: [f32; 4],
    pub fog_color: [f32; 4],
    /// x near, y far.
    pub fog_range: [f32; 4],
}

impl LitParams {
    pub fn with_color(color: [f32; 3]) -> Self {
        Self {
            color: [color[0], color[1], color[2], 1.0],
            ..Self::default()
        }
    }
}

impl Default for LitParams {
    fn default() -> Self {
        Self {
            color: [1.0; 4],
            sun: dir4(Vec3::new(1.0, 1.0, 1.0), 0.35),
            fog_color: hex4("#e8e8e8", 0.0),
            fog_range: [200.0, 500.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CityParams {
    pub wall_high: [f32; 4],
    pub wall_low: [f32; 4],
    /// rgb window tint, w window size within a grid cell.
    pub window: [f32; 4],
    pub sun: [f32; 4],
    pub fog_color: [f32; 4],
    /// x fog near, y fog far, z grid scale.
    pub fog_range: [f32; 4],
}

impl Default for CityParams {
    fn default() -> Self {
        Self {
            wall_high: hex4("#f2f2f0", 1.0),
            wall_low: hex4("#d4d4d2", 1.0),
            window: hex4("#1a1a2e", 0.6),
            sun: dir4(Vec3::ONE, 0.0),
            fog_color: hex4("#e8e8e8", 1.0),
            fog_range: [200.0, 500.0, 4.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaterParams {
    pub deep: [f32; 4],
    pub shallow: [f32; 4],
    pub sky: [f32; 4],
    pub sun: [f32; 4],
    /// Per wave: direction x, direction z, steepness, wavelength.
    pub waves: [[f32; 4]; 3],
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            deep: hex4("#0f242e", 1.0),
            shallow: hex4("#4a7a8c", 1.0),
            sky: hex4("#dbe5eb", 1.0),
            sun: dir4(Vec3::new(1.0, 0.4, 0.5), 0.0),
            waves: WATER_WAVES.map(|w| w.to_array()),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudParams {
    /// rgb tint, w density.
    pub color: [f32; 4],
    /// x drift speed.
    pub motion: [f32; 4],
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            color: hex4("#ffffff", 0.7),
            motion: [0.1, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LoaderParams {
    pub base_color: [f32; 4],
    pub glow_color: [f32; 4],
    /// x hold intensity, y hold time, z glow, w shatter.
    pub drive: [f32; 4],
    /// x audio level, y sonar cycle length.
    pub extra: [f32; 4],
}

impl LoaderParams {
    pub fn update(&mut self, drive: &LoaderDrive, audio_level: f32) {
        self.drive = [drive.hold, drive.hold_time, drive.glow, drive.shatter];
        self.extra[0] = audio_level.clamp(0.0, 1.0);
    }
}

impl Default for LoaderParams {
    fn default() -> Self {
        Self {
            base_color: hex4("#9aa4ad", 1.0),
            glow_color: hex4("#7fd4ff", 1.0),
            drive: [0.0; 4],
            extra: [0.0, crate::core::constants::SONAR_CYCLE_SEC, 0.0, 0.0],
        }
    }
}

/// Post-processing controls.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostParams {
    /// x bloom strength, y bright threshold, z fade to black, w exposure.
    pub controls: [f32; 4],
    /// xy blur direction in texels.
    pub blur: [f32; 4],
}

impl PostParams {
    pub fn with_fade(fade: f32) -> Self {
        let mut p = Self::default();
        p.controls[2] = fade.clamp(0.0, 1.0);
        p
    }
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            controls: [BLOOM_STRENGTH, BLOOM_THRESHOLD, 0.0, 1.0],
            blur: [0.0; 4],
        }
    }
}
