use crate::core::config::TimelineConfig;
use crate::core::constants::{
    NAVIGATE_DELAY_SEC, NAVIGATE_THRESHOLD, OVERLAY_FADE_SEC, SCROLL_INDICATOR_DROP_PX,
    SCROLL_INDICATOR_FADE_PX, SCRUB_SEC,
};
use crate::core::easing::sanitize_unit;
use crate::core::error::ConfigError;
use crate::core::navigation::{GateEvent, NavigationGate};
use crate::core::phase::{PhaseId, PhaseTable};
use crate::core::timeline::{Pose, ScrubDriver, Timeline};

/// Everything the landing scroll scene produces for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub raw_progress: f32,
    pub smoothed_progress: f32,
    pub phase: PhaseId,
    pub pose: Pose,
    pub nav: Option<GateEvent>,
    pub overlay_opacity: f32,
}

/// Scroll-driven camera path: scrubbed timeline, phase labels and the exit gate.
#[derive(Clone, Debug)]
pub struct ScrollScene {
    timeline: Timeline,
    phases: PhaseTable,
    scrub: ScrubDriver,
    gate: NavigationGate,
}

impl ScrollScene {
    pub fn new(cfg: &TimelineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            timeline: cfg.build_timeline()?,
            phases: cfg.build_phase_table()?,
            scrub: ScrubDriver::new(SCRUB_SEC),
            gate: NavigationGate::new(NAVIGATE_THRESHOLD, NAVIGATE_DELAY_SEC, OVERLAY_FADE_SEC),
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    pub fn gate(&self) -> &NavigationGate {
        &self.gate
    }

    /// Advance with the page's raw scroll progress. The camera follows the scrubbed
    /// value; phase labels and the exit gate follow the raw value.
    pub fn update(&mut self, raw_progress: f32, dt: f32, now: f64) -> ScrollFrame {
        let raw = sanitize_unit(raw_progress);
        self.scrub.set_target(raw);
        let smoothed = self.scrub.update(dt);
        let nav = self.gate.update(raw, now);
        match nav {
            Some(GateEvent::Scheduled) => log::info!("[nav] transition scheduled at {:.3}", raw),
            Some(GateEvent::Navigate) => log::info!("[nav] navigating"),
            None => {}
        }
        ScrollFrame {
            raw_progress: raw,
            smoothed_progress: smoothed,
            phase: self.phases.select(raw),
            pose: self.timeline.sample_progress(smoothed),
            nav,
            overlay_opacity: self.gate.overlay_opacity(now),
        }
    }

    pub fn label(&self, id: PhaseId) -> &str {
        self.phases.label(id)
    }

    pub fn cancel(&mut self) {
        self.gate.cancel();
    }
}

#[inline]
pub fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

/// Lines shown in the debug panel.
pub fn debug_lines(frame: &ScrollFrame, label: &str) -> [String; 4] {
    let cam = frame.pose.camera();
    let p = cam.position;
    let r = cam.rotation;
    [
        format!("Progress: {:.0}%", frame.raw_progress * 100.0),
        format!("Phase: {}", label),
        format!("Position: ({}, {}, {})", round2(p.x), round2(p.y), round2(p.z)),
        format!("Rotation: ({}, {}, {})", round2(r.x), round2(r.y), round2(r.z)),
    ]
}

/// Opacity and downward offset (px) of the "scroll to explore" hint.
pub fn scroll_indicator(scroll_px: f64) -> (f64, f64) {
    let t = if scroll_px.is_finite() {
        (scroll_px / SCROLL_INDICATOR_FADE_PX).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let eased = 1.0 - (1.0 - t) * (1.0 - t);
    (1.0 - eased, eased * SCROLL_INDICATOR_DROP_PX)
}
