// Host-side tests for the first-person walk controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod first_person {
        include!("../src/core/first_person.rs");
    }
}

use crate::core::constants::{EYE_HEIGHT, PITCH_LIMIT_RAD};
use crate::core::first_person::*;
use glam::Vec3;

fn holding(keys: &[MoveKey]) -> MoveIntent {
    let mut intent = MoveIntent::default();
    for &k in keys {
        intent.set(k, true);
    }
    intent
}

#[test]
fn key_map() {
    assert_eq!(move_key_for("w"), Some(MoveKey::Forward));
    assert_eq!(move_key_for("ArrowUp"), Some(MoveKey::Forward));
    assert_eq!(move_key_for("S"), Some(MoveKey::Backward));
    assert_eq!(move_key_for("a"), Some(MoveKey::Left));
    assert_eq!(move_key_for("ArrowRight"), Some(MoveKey::Right));
    assert_eq!(move_key_for(" "), Some(MoveKey::Jump));
    assert_eq!(move_key_for("Shift"), Some(MoveKey::Sprint));
    assert_eq!(move_key_for("q"), None);
    assert!(is_exit_key("Escape"));
    assert!(!is_exit_key("Esc"));
}

#[test]
fn opposing_keys_cancel() {
    let intent = holding(&[MoveKey::Forward, MoveKey::Backward, MoveKey::Right]);
    assert_eq!(intent.axes(), (1.0, 0.0));
    let mut intent = holding(&[MoveKey::Left]);
    assert_eq!(intent.axes(), (-1.0, 0.0));
    intent.clear();
    assert_eq!(intent, MoveIntent::default());
}

#[test]
fn walks_forward_along_negative_z_at_walk_speed() {
    let mut c = FirstPersonController::new(Vec3::new(0.0, 0.0, 20.0), 0.0, 150.0);
    c.tick(1.0, &holding(&[MoveKey::Forward]));
    assert!((c.position - Vec3::new(0.0, 0.0, 16.0)).length() < 1e-5);
}

#[test]
fn sprint_doubles_speed() {
    let mut c = FirstPersonController::new(Vec3::ZERO, 0.0, 150.0);
    c.tick(1.0, &holding(&[MoveKey::Right, MoveKey::Sprint]));
    assert!((c.position.x - 8.0).abs() < 1e-5);
}

#[test]
fn diagonal_is_not_faster() {
    let mut c = FirstPersonController::new(Vec3::ZERO, 0.0, 150.0);
    c.tick(1.0, &holding(&[MoveKey::Forward, MoveKey::Right]));
    assert!((c.position.length() - 4.0).abs() < 1e-4);
}

#[test]
fn jump_lands_back_on_the_ground() {
    let mut c = FirstPersonController::new(Vec3::ZERO, 0.0, 150.0);
    assert!(c.is_grounded());
    c.tick(1.0 / 60.0, &holding(&[MoveKey::Jump]));
    assert!(!c.is_grounded());
    assert!(c.position.y > 0.0);
    let idle = MoveIntent::default();
    for _ in 0..120 {
        c.tick(1.0 / 60.0, &idle);
    }
    assert!(c.is_grounded());
    assert_eq!(c.position.y, 0.0);
}

#[test]
fn position_stays_inside_bounds() {
    let mut c = FirstPersonController::new(Vec3::new(0.0, 0.0, -9.0), 0.0, 10.0);
    let fwd = holding(&[MoveKey::Forward, MoveKey::Sprint]);
    for _ in 0..10 {
        c.tick(0.1, &fwd);
    }
    assert_eq!(c.position.z, -10.0);
}

#[test]
fn pitch_is_clamped_and_bad_deltas_ignored() {
    let mut c = FirstPersonController::new(Vec3::ZERO, 0.0, 0.0);
    c.look(0.0, -100_000.0);
    assert_eq!(c.pitch, PITCH_LIMIT_RAD);
    c.look(0.0, 100_000.0);
    assert_eq!(c.pitch, -PITCH_LIMIT_RAD);
    let before = c;
    c.look(f32::NAN, 1.0);
    assert_eq!(c, before);
}

#[test]
fn eye_sits_above_the_feet() {
    let c = FirstPersonController::new(Vec3::new(1.0, 0.0, 2.0), 0.0, 150.0);
    assert_eq!(c.eye(), Vec3::new(1.0, EYE_HEIGHT, 2.0));
    let looking = c.orientation() * Vec3::NEG_Z;
    assert!((looking - Vec3::NEG_Z).length() < 1e-6);
}

#[test]
fn lock_requests_wait_out_the_cooldown() {
    let mut cd = LockCooldown::default();
    assert!(cd.can_request(0.0));
    cd.lock_changed(true, 10.0);
    assert!(!cd.can_request(10.5));
    assert!(cd.can_request(11.0));
}

#[test]
fn releasing_the_lock_does_not_restart_the_cooldown() {
    let mut cd = LockCooldown::default();
    cd.lock_changed(false, 5.0);
    assert!(cd.can_request(5.1));
    cd.lock_changed(true, 10.0);
    cd.lock_changed(false, 10.8);
    assert!(!cd.can_request(10.9));
    assert!(cd.can_request(11.0));
}

#[test]
fn cursor_toggle_carries_a_hide_flag() {
    assert_eq!(cursor_toggle_detail(true), ("hide", true));
    assert_eq!(cursor_toggle_detail(false), ("hide", false));
}
