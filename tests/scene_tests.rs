// Host-side tests for geometry preprocessing, the scene graph and the camera.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod timeline {
        include!("../src/core/timeline.rs");
    }
}

use crate::core::camera::{normalize_pointer, Camera};
use crate::core::geometry::*;
use crate::core::scene::{DoorHandles, SceneGraph};
use crate::core::timeline::{Pose, Track, Transform};
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::FRAC_PI_2;

#[test]
fn primitive_sizes() {
    let c = cuboid(Vec3::ONE, Vec3::ZERO);
    assert_eq!(c.vertices.len(), 24);
    assert_eq!(c.indices.len(), 36);
    assert_eq!(c.triangle_count(), 12);

    let g = plane_grid(2.0, 2.0, 4);
    assert_eq!(g.vertices.len(), 25);
    assert_eq!(g.triangle_count(), 32);
    assert!(g.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));

    let q = quad(1.0, 1.0);
    assert_eq!(q.triangle_count(), 2);
}

#[test]
fn cuboid_spans_center_plus_half_size() {
    let c = cuboid(Vec3::new(2.0, 4.0, 6.0), Vec3::new(1.0, 0.0, 0.0));
    let xs: Vec<f32> = c.vertices.iter().map(|v| v.position[0]).collect();
    let ys: Vec<f32> = c.vertices.iter().map(|v| v.position[1]).collect();
    assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 0.0);
    assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 2.0);
    assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 2.0);
}

#[test]
fn merge_offsets_indices() {
    let a = quad(1.0, 1.0);
    let b = quad(1.0, 1.0);
    let m = merge(&[a, b]);
    assert_eq!(m.vertices.len(), 8);
    assert_eq!(m.indices[6..], [4, 5, 6, 4, 6, 7]);
}

#[test]
fn transformed_moves_positions_and_keeps_normals_unit() {
    let q = quad(2.0, 2.0);
    let moved = q.transformed(Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
    assert!(moved.vertices.iter().all(|v| v.position[2] == 5.0));
    assert_eq!(moved.indices, q.indices);
    let scaled = q.transformed(Mat4::from_scale(Vec3::new(3.0, 1.0, 1.0)));
    for v in &scaled.vertices {
        assert!((Vec3::from(v.normal) - Vec3::Z).length() < 1e-6);
    }
}

#[test]
fn shards_share_one_vector_per_triangle() {
    let mesh = cuboid(Vec3::ONE, Vec3::ZERO);
    let mut rng = StdRng::seed_from_u64(3);
    let shards = to_shards(&mesh, &mut rng, false);
    assert_eq!(shards.len(), 36);
    for tri in shards.chunks_exact(3) {
        assert_eq!(tri[0].random, tri[1].random);
        assert_eq!(tri[1].random, tri[2].random);
        assert!(tri[0].random.iter().all(|c| (-1.0..1.0).contains(c)));
        assert!(tri.iter().all(|v| v.drop == 0.0));
    }
}

#[test]
fn shards_are_deterministic_for_a_seed() {
    let mesh = plane_grid(4.0, 4.0, 3);
    let a = to_shards(&mesh, &mut StdRng::seed_from_u64(42), true);
    let b = to_shards(&mesh, &mut StdRng::seed_from_u64(42), true);
    assert_eq!(a, b);
    assert!(a.iter().all(|v| v.drop == 1.0));
}

#[test]
fn shards_skip_triangles_with_bad_indices() {
    let mut mesh = quad(1.0, 1.0);
    mesh.indices.extend_from_slice(&[0, 1, 99]);
    let shards = to_shards(&mesh, &mut StdRng::seed_from_u64(1), false);
    assert_eq!(shards.len(), 6);
}

#[test]
fn penthouse_has_named_doors_and_drop_part() {
    let parts = penthouse_model();
    let names: Vec<&str> = parts.iter().map(|p| p.name).collect();
    for expected in [
        "building_bottom",
        "building_top",
        "penthouse_door_left",
        "penthouse_door_right",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
    assert!(parts
        .iter()
        .any(|p| matches!(p.surface, PartSurface::Water)));
}

#[test]
fn city_layout_is_seeded_and_keeps_plaza_clear() {
    let a = city_layout(&mut StdRng::seed_from_u64(7), 9, 24.0, 30.0);
    let b = city_layout(&mut StdRng::seed_from_u64(7), 9, 24.0, 30.0);
    assert_eq!(a, b);
    assert!(!a.is_empty() && a.len() < 81);
    for bld in &a {
        assert!(Vec2::new(bld.center.x, bld.center.z).length() >= 30.0);
        assert!(bld.size.y >= 10.0 && bld.size.y < 60.0);
        assert_eq!(bld.center.y, bld.size.y * 0.5);
    }
    assert_eq!(city_mesh(&a).triangle_count(), a.len() * 12);
}

fn door_graph() -> SceneGraph {
    let mut g = SceneGraph::new();
    let root = g.add(
        "root",
        None,
        Transform::new(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO),
        Vec3::splat(0.5),
    );
    g.add(
        "penthouse_door_left",
        Some(root),
        Transform::new(Vec3::new(-2.0, 0.0, 6.0), Vec3::ZERO),
        Vec3::ONE,
    );
    g.add(
        "penthouse_door_right",
        Some(root),
        Transform::new(Vec3::new(2.0, 0.0, 6.0), Vec3::ZERO),
        Vec3::ONE,
    );
    g
}

fn open_pose() -> Pose {
    let mut pose = Pose::default();
    pose.get_mut(Track::DoorLeft).rotation.y = -FRAC_PI_2;
    pose.get_mut(Track::DoorRight).rotation.y = FRAC_PI_2;
    pose
}

#[test]
fn world_matrix_composes_parents() {
    let g = door_graph();
    let left = g.find("penthouse_door_left").unwrap();
    let origin = g.world_matrix(left).transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(-1.0, 5.0, 3.0)).length() < 1e-5);
    assert_eq!(g.len(), 3);
    assert!(g.find("nope").is_none());
}

#[test]
fn doors_rotate_when_both_handles_resolve() {
    let mut g = door_graph();
    let doors = DoorHandles::resolve(&g, "penthouse_door_left", "penthouse_door_right");
    assert!(doors.is_complete());
    assert!(doors.apply(&mut g, &open_pose()));
    let left = doors.left.unwrap();
    assert_eq!(g.node(left).transform.rotation.y, -FRAC_PI_2);
}

#[test]
fn missing_door_is_a_no_op() {
    let mut g = SceneGraph::new();
    g.add("penthouse_door_left", None, Transform::IDENTITY, Vec3::ONE);
    let before = g.clone();
    let doors = DoorHandles::resolve(&g, "penthouse_door_left", "penthouse_door_right");
    assert!(!doors.is_complete());
    assert!(!doors.apply(&mut g, &open_pose()));
    let id = before.find("penthouse_door_left").unwrap();
    assert_eq!(g.node(id).transform, before.node(id).transform);
}

#[test]
fn pointer_normalization() {
    assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(normalize_pointer(900.0, -50.0, 800.0, 600.0), Vec2::new(1.0, 1.0));
    assert_eq!(normalize_pointer(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    assert_eq!(normalize_pointer(f32::NAN, 10.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn camera_looks_at_target() {
    let mut cam = Camera::new(100.0, 1.5, 0.1, 1000.0);
    cam.look_at(Vec3::new(0.0, 10.0, 15.0), Vec3::new(0.0, 0.0, 4.0));
    let expected = (Vec3::new(0.0, 0.0, 4.0) - Vec3::new(0.0, 10.0, 15.0)).normalize();
    assert!((cam.forward() - expected).length() < 1e-4);
    // the target lands in the middle of the screen
    let clip = cam.view_proj() * Vec3::new(0.0, 0.0, 4.0).extend(1.0);
    assert!((clip.x / clip.w).abs() < 1e-4);
    assert!((clip.y / clip.w).abs() < 1e-4);
}

#[test]
fn camera_aspect_never_divides_by_zero() {
    let mut cam = Camera::new(50.0, 1.0, 0.1, 1000.0);
    cam.set_aspect(1920, 0);
    assert!(cam.aspect.is_finite());
    cam.set_aspect(1920, 1080);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
}
