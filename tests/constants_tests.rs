// Host-side tests for constants and their mathematical relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core_constants {
    include!("../src/core/constants.rs");
}

use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn hold_and_reveal_timings_are_consistent() {
    assert!(HOLD_CEILING_SEC > 0.0);
    // the ceiling must leave room for more than one sonar wave
    assert!(SONAR_CYCLE_SEC > 0.0 && SONAR_CYCLE_SEC < HOLD_PULSE_PHASE_SEC);
    assert!(HOLD_INTENSITY_RATE > 0.0);
    assert!(GLOW_RATE_PER_SEC > 0.0 && SHATTER_RATE_PER_SEC > 0.0);
    // completion fires after the shatter uniform has saturated
    assert!(SHATTER_COMPLETE_AT > 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn scroll_constants_are_within_reasonable_bounds() {
    assert!(NAVIGATE_THRESHOLD > 0.0 && NAVIGATE_THRESHOLD < 1.0);
    assert!(SCRUB_SEC > 0.0);
    assert!(NAVIGATE_DELAY_SEC >= OVERLAY_FADE_SEC);
    assert!(SCROLL_INDICATOR_FADE_PX > 0.0);
    assert_ne!(EXPERIENCE_PATH, LANDING_PATH);
    assert_ne!(DOOR_LEFT_NAME, DOOR_RIGHT_NAME);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn volumes_are_normalized() {
    for v in [MODE_INITIATION_VOLUME, SYNTHETIC_MUSIC_VOLUME] {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_controls_are_sane() {
    assert!(ZNEAR > 0.0 && ZNEAR < ZFAR);
    for fov in [LANDING_FOV_DEG, PRELOADER_FOV_DEG, EXPERIENCE_FOV_DEG] {
        assert!(fov > 0.0 && fov < 180.0);
    }
    assert!(PITCH_LIMIT_RAD < std::f32::consts::FRAC_PI_2);
    assert!((PITCH_LIMIT_RAD - 85f32.to_radians()).abs() < 1e-4);
    assert!(SPRINT_MULTIPLIER > 1.0);
    assert!(CITY_CLEAR_RADIUS < CITY_SPACING * (CITY_GRID / 2) as f32);
}

#[test]
fn wasm_bindgen_is_declared_without_serde_support() {
    let manifest = include_str!("../Cargo.toml");
    let line = manifest
        .lines()
        .find(|l| l.starts_with("wasm-bindgen ="))
        .unwrap();
    assert_eq!(line.trim(), r#"wasm-bindgen = "0.2""#);
    assert!(!manifest.contains("serde-serialize"));
}
