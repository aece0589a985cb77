use crate::core::constants::{GLOW_RATE_PER_SEC, SHATTER_COMPLETE_AT, SHATTER_RATE_PER_SEC};
use crate::core::easing::sanitize_dt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealPhase {
    NotStarted,
    Glowing { progress: f32 },
    Shattering { progress: f32 },
    Complete,
}

impl RevealPhase {
    fn rank(self) -> u8 {
        match self {
            RevealPhase::NotStarted => 0,
            RevealPhase::Glowing { .. } => 1,
            RevealPhase::Shattering { .. } => 2,
            RevealPhase::Complete => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    ShatterStarted,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub glow_rate: f32,
    pub shatter_rate: f32,
    pub complete_at: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            glow_rate: GLOW_RATE_PER_SEC,
            shatter_rate: SHATTER_RATE_PER_SEC,
            complete_at: SHATTER_COMPLETE_AT,
        }
    }
}

/// Forward-only glow → shatter → complete sequence.
///
/// The shatter output is clamped at 1.0 but its accumulator keeps running until
/// `complete_at`, so the finished effect stays on screen before completion fires.
#[derive(Clone, Debug)]
pub struct RevealSequence {
    cfg: RevealConfig,
    phase: RevealPhase,
    glow_acc: f32,
    shatter_acc: f32,
}

impl RevealSequence {
    pub fn new(cfg: RevealConfig) -> Self {
        Self {
            cfg,
            phase: RevealPhase::NotStarted,
            glow_acc: 0.0,
            shatter_acc: 0.0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != RevealPhase::NotStarted
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RevealPhase::Complete
    }

    pub fn glow(&self) -> f32 {
        self.glow_acc.min(1.0)
    }

    pub fn shatter(&self) -> f32 {
        self.shatter_acc.min(1.0)
    }

    /// Begin the sequence; later calls are ignored.
    pub fn start(&mut self) -> bool {
        if self.is_started() {
            return false;
        }
        self.phase = RevealPhase::Glowing { progress: 0.0 };
        true
    }

    pub fn tick(&mut self, dt: f32) -> Option<RevealEvent> {
        let mut remaining = sanitize_dt(dt);
        let before = self.phase.rank();
        let mut event = None;

        if let RevealPhase::Glowing { .. } = self.phase {
            let rate = self.cfg.glow_rate.max(f32::EPSILON);
            self.glow_acc += remaining * rate;
            if self.glow_acc >= 1.0 {
                // Carry the unused part of this frame into the shatter phase.
                remaining = (self.glow_acc - 1.0) / rate;
                self.glow_acc = 1.0;
                self.phase = RevealPhase::Shattering { progress: 0.0 };
                event = Some(RevealEvent::ShatterStarted);
            } else {
                remaining = 0.0;
                self.phase = RevealPhase::Glowing {
                    progress: self.glow_acc,
                };
            }
        }

        if let RevealPhase::Shattering { .. } = self.phase {
            self.shatter_acc += remaining * self.cfg.shatter_rate;
            if self.shatter_acc > self.cfg.complete_at {
                self.phase = RevealPhase::Complete;
                event = Some(RevealEvent::Completed);
            } else {
                self.phase = RevealPhase::Shattering {
                    progress: self.shatter(),
                };
            }
        }

        debug_assert!(self.phase.rank() >= before);
        event
    }
}

impl Default for RevealSequence {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}
