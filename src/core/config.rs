use crate::core::easing::Ease;
use crate::core::error::ConfigError;
use crate::core::phase::PhaseTable;
use crate::core::timeline::{Pose, Timeline, Track, Transform};
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Camera waypoint reached at the end of a phase.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseTarget {
    pub label: &'static str,
    pub position: Vec3,
    pub rotation: Vec3,
    pub ease: Ease,
    /// Rotation starts this many seconds before the position move (blended overlap).
    pub rotation_lead: f32,
}

/// Door swing authored alongside the camera path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorSwing {
    pub start: f32,
    pub duration: f32,
    pub angle: f32,
    pub ease: Ease,
}

/// Data describing one variant of the scroll-driven camera path.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineConfig {
    pub initial_position: Vec3,
    pub initial_rotation: Vec3,
    pub phase_seconds: f32,
    pub phases: Vec<PhaseTarget>,
    pub doors: Option<DoorSwing>,
}

impl TimelineConfig {
    /// Three phases of three seconds: approach, turn toward the doors, final turn.
    pub fn three_phase() -> Self {
        Self {
            initial_position: Vec3::new(0.0, 7.0, 12.0),
            initial_rotation: Vec3::ZERO,
            phase_seconds: 3.0,
            phases: vec![
                PhaseTarget {
                    label: "Phase 1: Moving Left",
                    position: Vec3::new(0.0, 5.5, 3.0),
                    rotation: Vec3::ZERO,
                    ease: Ease::SineInOut,
                    rotation_lead: 0.0,
                },
                PhaseTarget {
                    label: "Phase 2: Center Approach",
                    position: Vec3::new(0.0, 5.5, 1.3),
                    rotation: Vec3::new(0.0, -1.57, 0.0),
                    ease: Ease::SineInOut,
                    rotation_lead: 0.5,
                },
                PhaseTarget {
                    label: "Phase 3: Final Turn & Stop",
                    position: Vec3::new(2.5, 5.5, 1.3),
                    rotation: Vec3::new(0.0, -3.14, 0.0),
                    ease: Ease::Power2Out,
                    rotation_lead: 0.0,
                },
            ],
            doors: Some(DoorSwing {
                start: 2.0,
                duration: 3.0,
                angle: FRAC_PI_2,
                ease: Ease::Power1InOut,
            }),
        }
    }

    /// Four phases of three seconds; adds a walk through the opened doors.
    pub fn four_phase() -> Self {
        Self {
            initial_position: Vec3::new(0.0, 7.0, 14.0),
            initial_rotation: Vec3::ZERO,
            phase_seconds: 3.0,
            phases: vec![
                PhaseTarget {
                    label: "Phase 1: Descent",
                    position: Vec3::new(0.0, 6.0, 6.0),
                    rotation: Vec3::new(-0.1, 0.0, 0.0),
                    ease: Ease::SineInOut,
                    rotation_lead: 0.0,
                },
                PhaseTarget {
                    label: "Phase 2: Door Approach",
                    position: Vec3::new(0.0, 5.5, 3.0),
                    rotation: Vec3::ZERO,
                    ease: Ease::SineInOut,
                    rotation_lead: 0.5,
                },
                PhaseTarget {
                    label: "Phase 3: Threshold",
                    position: Vec3::new(0.0, 5.5, 1.3),
                    rotation: Vec3::new(0.0, -1.57, 0.0),
                    ease: Ease::SineInOut,
                    rotation_lead: 0.5,
                },
                PhaseTarget {
                    label: "Phase 4: Final Turn & Stop",
                    position: Vec3::new(2.5, 5.5, 1.3),
                    rotation: Vec3::new(0.0, -3.14, 0.0),
                    ease: Ease::Power2Out,
                    rotation_lead: 0.0,
                },
            ],
            doors: Some(DoorSwing {
                start: 4.0,
                duration: 3.0,
                angle: FRAC_PI_2,
                ease: Ease::Power1InOut,
            }),
        }
    }

    /// Preset chosen by a `data-variant` attribute value ("4" selects four phases).
    pub fn from_variant(variant: Option<&str>) -> Self {
        match variant.map(str::trim) {
            Some("4") => Self::four_phase(),
            _ => Self::three_phase(),
        }
    }

    pub fn initial_pose(&self) -> Pose {
        Pose::new(
            Transform::new(self.initial_position, self.initial_rotation),
            Transform::IDENTITY,
            Transform::IDENTITY,
        )
    }

    pub fn build_timeline(&self) -> Result<Timeline, ConfigError> {
        let mut b = Timeline::builder(self.initial_pose());
        for (i, ph) in self.phases.iter().enumerate() {
            let start = i as f32 * self.phase_seconds;
            let rot_start = (start - ph.rotation_lead).max(0.0);
            let rot_duration = self.phase_seconds + (start - rot_start);
            b = b
                .to_position(Track::Camera, ph.position, start, self.phase_seconds, ph.ease)
                .to_rotation(Track::Camera, ph.rotation, rot_start, rot_duration, ph.ease);
        }
        if let Some(d) = self.doors {
            b = b
                .to_rotation(
                    Track::DoorLeft,
                    Vec3::new(0.0, -d.angle, 0.0),
                    d.start,
                    d.duration,
                    d.ease,
                )
                .to_rotation(
                    Track::DoorRight,
                    Vec3::new(0.0, d.angle, 0.0),
                    d.start,
                    d.duration,
                    d.ease,
                );
        }
        b.build()
    }

    /// Equal-width phase ranges matching the timeline's phase count.
    pub fn build_phase_table(&self) -> Result<PhaseTable, ConfigError> {
        let n = self.phases.len();
        let boundaries: Vec<f32> = (1..n).map(|i| equal_boundary(i, n)).collect();
        PhaseTable::new(self.phases.iter().map(|p| p.label).collect(), &boundaries)
    }
}

// 3 phases use the authored 0.33 / 0.66 cut points rather than exact thirds.
fn equal_boundary(i: usize, n: usize) -> f32 {
    if n == 3 {
        [0.33, 0.66][i - 1]
    } else {
        i as f32 / n as f32
    }
}
