// Host-side tests for the shader math mirrors (water, clouds, city).
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod shading {
        include!("../src/core/shading.rs");
    }
}

use crate::core::shading::*;
use glam::{Vec2, Vec3};

#[test]
fn gerstner_is_a_pure_function_of_position_and_time() {
    let p = Vec3::new(3.0, 0.0, -7.5);
    let a = water_surface(&WATER_WAVES, p, 12.25);
    let b = water_surface(&WATER_WAVES, p, 12.25);
    assert_eq!(a, b);
}

#[test]
fn flat_wave_leaves_grid_untouched() {
    let calm = [WaveParams::new(1.0, 0.0, 0.0, 10.0)];
    let p = Vec3::new(1.5, 0.0, 2.5);
    let (pos, normal) = water_surface(&calm, p, 4.0);
    assert!((pos - p).length() < 1e-6);
    assert!((normal - Vec3::Y).length() < 1e-6);
}

#[test]
fn displaced_normals_point_up_and_are_unit_length() {
    for i in 0..25 {
        let p = Vec3::new(i as f32 * 0.7 - 8.0, 0.0, i as f32 * -0.3 + 2.0);
        let (pos, n) = water_surface(&WATER_WAVES, p, i as f32);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.y > 0.5);
        // small steepness keeps the swell within a few centimetres
        assert!(pos.y.abs() < 0.1);
    }
}

#[test]
fn single_wave_displacement_matches_amplitude() {
    let w = WaveParams::new(1.0, 0.0, 0.5, 4.0);
    let mut t = Vec3::X;
    let mut b = Vec3::Z;
    let amplitude = 0.5 / (std::f32::consts::TAU / 4.0);
    for i in 0..40 {
        let d = gerstner_wave(&w, Vec3::new(i as f32 * 0.1, 0.0, 0.0), 0.0, &mut t, &mut b);
        assert!(d.y.abs() <= amplitude + 1e-5);
        assert_eq!(d.z, 0.0);
    }
}

#[test]
fn fresnel_and_alpha_bounds() {
    assert!((fresnel_schlick(1.0, 0.02) - 0.02).abs() < 1e-6);
    assert!((fresnel_schlick(0.0, 0.02) - 1.0).abs() < 1e-6);
    assert_eq!(water_alpha(0.0), 0.5);
    assert_eq!(water_alpha(1.0), 1.0);
    assert_eq!(specular_exponent(1.0), 10.0);
    assert_eq!(specular_exponent(0.0), 200.0);
}

#[test]
fn value_noise_hits_hash_at_lattice_points() {
    for (x, y) in [(0.0, 0.0), (3.0, 4.0), (-2.0, 7.0)] {
        let p = Vec2::new(x, y);
        assert_eq!(value_noise(p), cloud_hash(p));
    }
}

#[test]
fn cloud_noise_stays_in_unit_range() {
    for i in 0..50 {
        let uv = Vec2::new(i as f32 * 0.02, 1.0 - i as f32 * 0.02);
        let h = cloud_hash(uv * 10.0);
        assert!((0.0..1.0).contains(&h));
        let f = fbm(uv * 6.0);
        assert!((0.0..1.0).contains(&f));
        let n = cloud_noise(uv, i as f32, 0.1);
        assert!((0.0..1.0).contains(&n));
    }
}

#[test]
fn cloud_alpha_fades_at_edges_and_caps() {
    assert_eq!(cloud_alpha(Vec2::ZERO, 1.0, 0.7), 0.0);
    assert!((cloud_alpha(Vec2::splat(0.5), 1.0, 0.7) - 0.9).abs() < 1e-6);
    assert_eq!(cloud_alpha(Vec2::splat(0.5), 0.1, 0.7), 0.0);
}

#[test]
fn grid_plane_follows_dominant_axis() {
    assert_eq!(grid_plane(Vec3::X), GridPlane::Zy);
    assert_eq!(grid_plane(Vec3::NEG_X), GridPlane::Zy);
    assert_eq!(grid_plane(Vec3::Y), GridPlane::Xz);
    assert_eq!(grid_plane(Vec3::Z), GridPlane::Xy);
    let uv = grid_coords(Vec3::new(8.0, 4.0, 12.0), Vec3::X, 4.0);
    assert_eq!(uv, Vec2::new(48.0, 16.0));
}

#[test]
fn window_grid_has_four_cells_per_world_unit() {
    assert_eq!(grid_coords(Vec3::new(1.0, 2.0, 0.0), Vec3::Z, 4.0), Vec2::new(4.0, 8.0));
    assert_eq!(grid_coords(Vec3::new(0.5, 9.0, -1.0), Vec3::Y, 4.0), Vec2::new(2.0, -4.0));
    // one world unit of wall spans four whole tiles
    let a = grid_coords(Vec3::new(0.0, 3.0, 0.1), Vec3::Z, 4.0).floor();
    let b = grid_coords(Vec3::new(1.0, 3.0, 0.1), Vec3::Z, 4.0).floor();
    assert_eq!(b.x - a.x, 4.0);
}

#[test]
fn windows_skip_roofs_and_margins() {
    for i in 0..20 {
        assert!(!city_window_visible(Vec3::Y, Vec2::new(i as f32, 3.0)));
    }
    assert_eq!(window_mask(Vec2::splat(0.5), 0.6), 1.0);
    assert_eq!(window_mask(Vec2::splat(0.05), 0.6), 0.0);
    assert_eq!(window_mask(Vec2::new(0.5, 0.95), 0.6), 0.0);
}

#[test]
fn city_wall_gets_brighter_with_height() {
    let low = Vec3::splat(0.8);
    let high = Vec3::splat(0.95);
    let tile = Vec2::new(2.0, 5.0);
    let bottom = city_wall_color(low, high, -20.0, tile);
    let top = city_wall_color(low, high, 80.0, tile);
    assert!(top.x > bottom.x);
}

#[test]
fn wall_gradient_is_half_way_at_twenty_units_of_local_height() {
    let low = Vec3::ZERO;
    let high = Vec3::ONE;
    let tile = Vec2::new(7.0, 1.0);
    let jitter = 0.95 + 0.1 * hash_sin(tile + Vec2::ONE);
    let mid = city_wall_color(low, high, 20.0, tile);
    assert!((mid - Vec3::splat(0.5 * jitter)).length() < 1e-5);
    assert!(city_wall_color(low, high, -10.0, tile).length() < 1e-6);
}

#[test]
fn fbm_triples_frequency_per_octave() {
    // 0.5 and 0.25 stay exact under repeated tripling
    let p = Vec2::new(0.5, 0.25);
    let mut expected = 0.0;
    let mut amplitude = 0.5;
    let mut freq = 1.0;
    for _ in 0..FBM_OCTAVES {
        expected += amplitude * value_noise(p * freq);
        amplitude *= 0.5;
        freq *= 3.0;
    }
    assert!((fbm(p) - expected).abs() < 1e-6);
}

#[test]
fn fbm_reference_value() {
    assert!((fbm(Vec2::new(1.37, 2.91)) - 0.420_990_1).abs() < 1e-4);
}

#[test]
fn simplex_noise_is_bounded_and_varies() {
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for i in 0..40 {
        for j in 0..40 {
            let v = Vec3::new(i as f32 * 0.173 - 3.0, j as f32 * 0.219 - 4.0, 0.37);
            let n = simplex3(v);
            assert!(n.is_finite());
            assert!(n.abs() <= 1.5, "{n} at {v}");
            assert_eq!(n, simplex3(v));
            lo = lo.min(n);
            hi = hi.max(n);
        }
    }
    assert!(lo < -0.2 && hi > 0.2);
}

#[test]
fn ripples_use_world_position_and_time() {
    let a = ripple_noise(Vec2::new(1.0, 2.0), 0.0);
    let b = ripple_noise(Vec2::new(1.0, 2.0), 30.0);
    let c = ripple_noise(Vec2::new(4.0, -2.0), 0.0);
    assert_eq!(a, ripple_noise(Vec2::new(1.0, 2.0), 0.0));
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn ripple_offset_is_equal_on_every_axis() {
    let n = ripple_normal(Vec3::Y, 0.5, 0.25);
    let expected = (Vec3::Y + Vec3::splat(0.06)).normalize();
    assert!((n - expected).length() < 1e-6);
    assert!((n.x - n.z).abs() < 1e-7);
    assert!(n.x > 0.0);
}

#[test]
fn specular_is_added_before_the_sky_mix() {
    let base = Vec3::new(0.1, 0.2, 0.3);
    let sky = Vec3::new(0.8, 0.85, 0.9);
    // full reflection hides the sun highlight entirely
    let c = water_compose(base, 0.6, sky, 1.0, 1.0);
    assert!((c - sky).length() < 1e-6);
    // downward normals skip the reflection
    let c = water_compose(base, 0.5, sky, 1.0, -0.2);
    assert!((c - (base + Vec3::new(1.0, 0.95, 0.8) * 0.5)).length() < 1e-6);
}

#[test]
fn water_color_is_clamped() {
    let c = water_compose(Vec3::splat(0.9), 0.6, Vec3::ONE, 0.0, 1.0);
    assert_eq!(c, Vec3::ONE);
    assert_eq!(water_alpha(1.5), 1.0);
}

#[test]
fn fog_and_diffuse_terms() {
    assert_eq!(fog_factor(100.0, 200.0, 500.0), 0.0);
    assert_eq!(fog_factor(600.0, 200.0, 500.0), 1.0);
    assert!((soft_diffuse(Vec3::Y, Vec3::Y) - 1.15).abs() < 1e-6);
    assert!((soft_diffuse(Vec3::Y, Vec3::NEG_Y) - 0.65).abs() < 1e-6);
}
