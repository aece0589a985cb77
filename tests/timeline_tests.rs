// Host-side tests for easing, the camera timeline, phase lookup and presets.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod easing {
        include!("../src/core/easing.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod phase {
        include!("../src/core/phase.rs");
    }
    pub mod timeline {
        include!("../src/core/timeline.rs");
    }
}

use crate::core::config::TimelineConfig;
use crate::core::easing::{lerp, sanitize_dt, sanitize_unit, smoothstep, Ease};
use crate::core::error::ConfigError;
use crate::core::phase::{PhaseId, PhaseTable};
use crate::core::timeline::{Channel, Pose, ScrubDriver, Timeline, Track};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn approx_vec(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}

const ALL_EASES: [Ease; 5] = [
    Ease::Linear,
    Ease::SineInOut,
    Ease::Power1InOut,
    Ease::Power2Out,
    Ease::Power3Out,
];

#[test]
fn every_ease_maps_endpoints() {
    for e in ALL_EASES {
        assert!(approx(e.apply(0.0), 0.0, 1e-6), "{e:?} at 0");
        assert!(approx(e.apply(1.0), 1.0, 1e-6), "{e:?} at 1");
    }
}

#[test]
fn eases_clamp_and_sanitize_input() {
    for e in ALL_EASES {
        assert_eq!(e.apply(f32::NAN), e.apply(0.0));
        assert!(approx(e.apply(2.0), 1.0, 1e-6));
        assert!(approx(e.apply(-3.0), 0.0, 1e-6));
    }
}

#[test]
fn eases_are_monotonic() {
    for e in ALL_EASES {
        let mut prev = e.apply(0.0);
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev - 1e-6, "{e:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn in_out_curves_are_symmetric_at_midpoint() {
    assert!(approx(Ease::SineInOut.apply(0.5), 0.5, 1e-6));
    assert!(approx(Ease::Power1InOut.apply(0.5), 0.5, 1e-6));
    // out curves are ahead of linear
    assert!(Ease::Power2Out.apply(0.5) > 0.5);
    assert!(Ease::Power3Out.apply(0.5) > Ease::Power2Out.apply(0.5));
}

#[test]
fn scalar_helpers() {
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!(approx(smoothstep(0.0, 1.0, 0.5), 0.5, 1e-6));
    assert_eq!(sanitize_unit(f32::NAN), 0.0);
    assert_eq!(sanitize_unit(1.5), 1.0);
    assert_eq!(sanitize_dt(-0.1), 0.0);
    assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    assert_eq!(sanitize_dt(0.25), 0.25);
}

#[test]
fn later_segment_takes_over_from_current_value() {
    let tl = Timeline::builder(Pose::default())
        .to_channel(Track::Camera, Channel::PosX, 10.0, 0.0, 2.0, Ease::Linear)
        .to_channel(Track::Camera, Channel::PosX, 0.0, 1.0, 2.0, Ease::Linear)
        .build()
        .unwrap();
    assert_eq!(tl.duration(), 3.0);
    assert!(approx(tl.sample(0.5).camera().position.x, 2.5, 1e-5));
    // the second tween starts from 5, where the first one was at t = 1
    assert!(approx(tl.sample(1.0).camera().position.x, 5.0, 1e-5));
    assert!(approx(tl.sample(2.0).camera().position.x, 2.5, 1e-5));
    assert!(approx(tl.sample(3.0).camera().position.x, 0.0, 1e-5));
}

#[test]
fn sample_clamps_time_and_leaves_untouched_channels() {
    let initial = Pose::new(
        crate::core::timeline::Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO),
        Default::default(),
        Default::default(),
    );
    let tl = Timeline::builder(initial)
        .to_position(Track::Camera, Vec3::new(5.0, 2.0, 3.0), 0.0, 1.0, Ease::Linear)
        .build()
        .unwrap();
    assert_eq!(tl.sample(-1.0), tl.sample(0.0));
    assert_eq!(tl.sample(f32::NAN), tl.sample(0.0));
    assert_eq!(tl.sample(10.0), tl.sample(1.0));
    let end = tl.sample(1.0);
    assert!(approx_vec(end.camera().position, Vec3::new(5.0, 2.0, 3.0), 1e-6));
    assert_eq!(end.get(Track::DoorLeft), initial.get(Track::DoorLeft));
}

#[test]
fn builder_rejects_bad_segments() {
    let err = Timeline::builder(Pose::default())
        .to_channel(Track::Camera, Channel::PosY, 1.0, 0.0, 0.0, Ease::Linear)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::SegmentTiming { index: 0, .. }));

    let err = Timeline::builder(Pose::default())
        .to_channel(Track::Camera, Channel::PosY, 1.0, 0.0, 1.0, Ease::Linear)
        .to_channel(Track::Camera, Channel::PosY, 1.0, -1.0, 1.0, Ease::Linear)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::SegmentTiming { index: 1, .. }));

    let err = Timeline::builder(Pose::default())
        .to_channel(Track::Camera, Channel::RotY, f32::NAN, 0.0, 1.0, Ease::Linear)
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::SegmentTarget { index: 0 });
}

#[test]
fn three_phase_path_starts_at_initial_pose() {
    let cfg = TimelineConfig::three_phase();
    let tl = cfg.build_timeline().unwrap();
    assert_eq!(tl.duration(), 9.0);
    let start = tl.sample_progress(0.0).camera();
    assert!(approx_vec(start.position, Vec3::new(0.0, 7.0, 12.0), 1e-6));
    assert!(approx_vec(start.rotation, Vec3::ZERO, 1e-6));
}

#[test]
fn three_phase_path_ends_at_final_waypoint() {
    let tl = TimelineConfig::three_phase().build_timeline().unwrap();
    let end = tl.sample_progress(1.0);
    assert!(approx_vec(end.camera().position, Vec3::new(2.5, 5.5, 1.3), 1e-4));
    assert!(approx(end.camera().rotation.y, -3.14, 1e-4));
    assert!(approx(end.get(Track::DoorLeft).rotation.y, -FRAC_PI_2, 1e-5));
    assert!(approx(end.get(Track::DoorRight).rotation.y, FRAC_PI_2, 1e-5));
}

#[test]
fn doors_stay_shut_until_their_segment_starts() {
    let tl = TimelineConfig::three_phase().build_timeline().unwrap();
    let before = tl.sample(2.0);
    assert_eq!(before.get(Track::DoorLeft).rotation, Vec3::ZERO);
    let mid = tl.sample(3.5);
    assert!(mid.get(Track::DoorLeft).rotation.y < 0.0);
    assert!(mid.get(Track::DoorRight).rotation.y > 0.0);
}

#[test]
fn rotation_lead_overlaps_previous_phase() {
    let tl = TimelineConfig::three_phase().build_timeline().unwrap();
    // Phase 2 rotation starts 0.5 s before phase 1 ends.
    assert_eq!(tl.sample(2.4).camera().rotation.y, 0.0);
    assert!(tl.sample(2.9).camera().rotation.y < 0.0);
}

#[test]
fn sampling_is_deterministic() {
    let tl = TimelineConfig::four_phase().build_timeline().unwrap();
    for i in 0..=20 {
        let p = i as f32 / 20.0;
        assert_eq!(tl.sample_progress(p), tl.sample_progress(p));
    }
}

#[test]
fn three_phase_labels_follow_progress() {
    let table = TimelineConfig::three_phase().build_phase_table().unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.label_at(0.0), "Phase 1: Moving Left");
    assert_eq!(table.label_at(0.329), "Phase 1: Moving Left");
    assert_eq!(table.label_at(0.33), "Phase 2: Center Approach");
    assert_eq!(table.label_at(0.5), "Phase 2: Center Approach");
    assert_eq!(table.label_at(0.66), "Phase 3: Final Turn & Stop");
    assert_eq!(table.label_at(1.0), "Phase 3: Final Turn & Stop");
    assert_eq!(table.select(f32::NAN), PhaseId(0));
    assert_eq!(table.select(7.0), PhaseId(2));
}

#[test]
fn phases_partition_unit_interval() {
    let table = TimelineConfig::four_phase().build_phase_table().unwrap();
    let phases = table.phases();
    assert_eq!(phases.first().map(|p| p.start), Some(0.0));
    assert_eq!(phases.last().map(|p| p.end), Some(1.0));
    for pair in phases.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(table.label_at(0.5), "Phase 3: Threshold");
}

#[test]
fn phase_table_rejects_invalid_boundaries() {
    assert_eq!(
        PhaseTable::new(Vec::<&str>::new(), &[]).unwrap_err(),
        ConfigError::NoPhases
    );
    assert_eq!(
        PhaseTable::new(vec!["a", "b"], &[]).unwrap_err(),
        ConfigError::BoundaryCount {
            expected: 1,
            got: 0
        }
    );
    assert_eq!(
        PhaseTable::new(vec!["a", "b", "c"], &[0.5, 0.4]).unwrap_err(),
        ConfigError::BoundaryOrder {
            index: 1,
            value: 0.4
        }
    );
    assert!(PhaseTable::new(vec!["a", "b"], &[1.0]).is_err());
    assert!(PhaseTable::new(vec!["only"], &[]).is_ok());
}

#[test]
fn variant_selects_preset() {
    assert_eq!(TimelineConfig::from_variant(None).phases.len(), 3);
    assert_eq!(TimelineConfig::from_variant(Some("3")).phases.len(), 3);
    assert_eq!(TimelineConfig::from_variant(Some(" 4 ")).phases.len(), 4);
    assert_eq!(TimelineConfig::from_variant(Some("seven")).phases.len(), 3);
}

#[test]
fn scrub_lags_then_converges() {
    let mut s = ScrubDriver::new(1.5);
    s.set_target(1.0);
    assert_eq!(s.update(0.0), 0.0);
    let first = s.update(1.0 / 60.0);
    assert!(first > 0.0 && first < 0.1);
    for _ in 0..89 {
        s.update(1.0 / 60.0);
    }
    assert!(s.current() > 0.94 && s.current() < 1.0);
    // a long stall snaps onto the target
    assert_eq!(s.update(100.0), 1.0);
}

#[test]
fn scrub_is_frame_rate_independent() {
    let mut coarse = ScrubDriver::new(1.5);
    let mut fine = ScrubDriver::new(1.5);
    coarse.set_target(0.8);
    fine.set_target(0.8);
    coarse.update(0.5);
    for _ in 0..30 {
        fine.update(0.5 / 30.0);
    }
    assert!(approx(coarse.current(), fine.current(), 1e-3));
}

#[test]
fn scrub_sanitizes_input() {
    let mut s = ScrubDriver::new(1.5);
    s.set_target(f32::NAN);
    assert_eq!(s.target(), 0.0);
    s.set_target(0.5);
    assert_eq!(s.update(f32::NAN), 0.0);
    let mut instant = ScrubDriver::new(0.0);
    instant.set_target(0.7);
    assert_eq!(instant.update(0.016), 0.7);
}
