use crate::core::constants::{CITY_CLEAR_RADIUS, CITY_GRID, CITY_SPACING};
use crate::core::geometry::{self, ModelPart, PartSurface};
use crate::core::materials::{CityParams, CloudParams, LitParams, MaterialKind, WaterParams};
use crate::core::scene::{NodeId, SceneGraph};
use crate::core::timeline::Transform;
use crate::render::{DrawId, GpuState};
use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::FRAC_PI_2;

const CITY_SEED: u64 = 7;

/// Seeded skyline around the origin.
pub fn add_city(gpu: &mut GpuState<'static>, offset: Vec3) -> DrawId {
    let mut rng = StdRng::seed_from_u64(CITY_SEED);
    let buildings = geometry::city_layout(&mut rng, CITY_GRID, CITY_SPACING, CITY_CLEAR_RADIUS);
    log::info!("[assets] city: {} buildings", buildings.len());
    let mesh = geometry::city_mesh(&buildings);
    gpu.add_mesh(
        "city",
        MaterialKind::City,
        &mesh,
        Mat4::from_translation(offset),
        &CityParams::default(),
    )
}

pub fn add_ground(gpu: &mut GpuState<'static>, size: f32, y: f32) -> DrawId {
    let mesh = geometry::plane_grid(size, size, 1);
    gpu.add_mesh(
        "ground",
        MaterialKind::Lit,
        &mesh,
        Mat4::from_translation(Vec3::Y * y),
        &LitParams::with_color([0.78, 0.78, 0.76]),
    )
}

pub fn add_water(gpu: &mut GpuState<'static>, size: f32, segments: u32, center: Vec3) -> DrawId {
    let mesh = geometry::plane_grid(size, size, segments);
    gpu.add_mesh(
        "water",
        MaterialKind::Water,
        &mesh,
        Mat4::from_translation(center),
        &WaterParams::default(),
    )
}

/// A few large horizontal cloud sheets overhead.
pub fn add_clouds(gpu: &mut GpuState<'static>, height: f32) -> Vec<DrawId> {
    let mesh = geometry::quad(1.0, 1.0);
    let sheets = [
        (Vec3::new(-60.0, height, -80.0), 180.0),
        (Vec3::new(90.0, height + 12.0, -20.0), 140.0),
        (Vec3::new(-20.0, height + 6.0, 110.0), 160.0),
    ];
    sheets
        .iter()
        .map(|&(pos, size)| {
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(size),
                Quat::from_rotation_x(-FRAC_PI_2),
                pos,
            );
            gpu.add_mesh("cloud", MaterialKind::Cloud, &mesh, model, &CloudParams::default())
        })
        .collect()
}

/// Penthouse parts registered as scene nodes under `root`, each with its own draw.
pub fn add_model_parts(
    gpu: &mut GpuState<'static>,
    graph: &mut SceneGraph,
    root: NodeId,
    parts: &[ModelPart],
) -> Vec<(NodeId, DrawId)> {
    parts
        .iter()
        .map(|part| {
            let node = graph.add(part.name, Some(root), part.transform, Vec3::ONE);
            let world = graph.world_matrix(node);
            let draw = match part.surface {
                PartSurface::Lit { color } => gpu.add_mesh(
                    part.name,
                    MaterialKind::Lit,
                    &part.mesh,
                    world,
                    &LitParams::with_color(color),
                ),
                PartSurface::Water => gpu.add_mesh(
                    part.name,
                    MaterialKind::Water,
                    &part.mesh,
                    world,
                    &WaterParams::default(),
                ),
            };
            (node, draw)
        })
        .collect()
}

pub fn root_transform(position: Vec3) -> Transform {
    Transform::new(position, Vec3::ZERO)
}
