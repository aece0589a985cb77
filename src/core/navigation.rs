use crate::core::easing::sanitize_unit;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateState {
    Armed,
    Pending { scheduled_at: f64, fire_at: f64 },
    Fired { scheduled_at: f64 },
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEvent {
    /// Threshold crossed; the overlay starts fading in.
    Scheduled,
    /// Delay elapsed; request the page transition.
    Navigate,
}

/// One-shot transition trigger at the end of the scroll path.
///
/// Crossing `threshold` schedules navigation `delay_sec` later. Scroll jitter around
/// the threshold cannot schedule twice; the gate never re-arms within a session.
#[derive(Clone, Copy, Debug)]
pub struct NavigationGate {
    threshold: f32,
    delay_sec: f64,
    fade_sec: f64,
    state: GateState,
}

impl NavigationGate {
    pub fn new(threshold: f32, delay_sec: f64, fade_sec: f64) -> Self {
        Self {
            threshold,
            delay_sec: delay_sec.max(0.0),
            fade_sec: fade_sec.max(0.0),
            state: GateState::Armed,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn has_triggered(&self) -> bool {
        matches!(self.state, GateState::Pending { .. } | GateState::Fired { .. })
    }

    /// Feed the raw scroll progress and the current clock (seconds).
    pub fn update(&mut self, progress: f32, now: f64) -> Option<GateEvent> {
        match self.state {
            GateState::Armed => {
                if sanitize_unit(progress) > self.threshold {
                    self.state = GateState::Pending {
                        scheduled_at: now,
                        fire_at: now + self.delay_sec,
                    };
                    Some(GateEvent::Scheduled)
                } else {
                    None
                }
            }
            GateState::Pending {
                scheduled_at,
                fire_at,
            } => {
                if now >= fire_at {
                    self.state = GateState::Fired { scheduled_at };
                    Some(GateEvent::Navigate)
                } else {
                    None
                }
            }
            GateState::Fired { .. } | GateState::Cancelled => None,
        }
    }

    /// Drop a pending navigation (scene teardown). A fired gate stays fired.
    pub fn cancel(&mut self) {
        if !matches!(self.state, GateState::Fired { .. }) {
            self.state = GateState::Cancelled;
        }
    }

    /// Opacity of the full-screen mask, ramping in once navigation is scheduled.
    pub fn overlay_opacity(&self, now: f64) -> f32 {
        let since = match self.state {
            GateState::Pending { scheduled_at, .. } | GateState::Fired { scheduled_at } => {
                now - scheduled_at
            }
            _ => return 0.0,
        };
        if self.fade_sec <= 0.0 {
            return 1.0;
        }
        (since / self.fade_sec).clamp(0.0, 1.0) as f32
    }
}
