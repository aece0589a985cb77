use crate::core::constants::{
    HOLD_CEILING_SEC, HOLD_INTENSITY_RATE, HOLD_PULSE_PHASE_SEC, HOLD_REST_INTENSITY,
    SONAR_CYCLE_SEC,
};
use crate::core::cue::{AudioCommand, AudioCommands, Cue};
use crate::core::easing::sanitize_dt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoldState {
    Idle,
    Holding { elapsed: f32 },
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldConfig {
    pub ceiling_sec: f32,
    pub pulse_phase_sec: f32,
    pub cycle_sec: f32,
    pub intensity_rate: f32,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            ceiling_sec: HOLD_CEILING_SEC,
            pulse_phase_sec: HOLD_PULSE_PHASE_SEC,
            cycle_sec: SONAR_CYCLE_SEC,
            intensity_rate: HOLD_INTENSITY_RATE,
        }
    }
}

// Per-hold one-shot flags, cleared on release.
#[derive(Clone, Copy, Debug, Default)]
struct HoldSession {
    pulse_stopped: bool,
    mode_cue_played: bool,
    ambient_started: bool,
}

/// Tracks a sustained pointer hold and emits the matching audio cues.
///
/// While holding, elapsed time accumulates up to the ceiling. During the pulse phase a
/// sonar cue restarts each time the shared clock wraps a cycle. Leaving the pulse phase
/// fires the initiation cue and the synthetic track once per hold. Release resets.
#[derive(Clone, Debug)]
pub struct HoldMachine {
    cfg: HoldConfig,
    state: HoldState,
    session: HoldSession,
    intensity: f32,
    locked: bool,
}

impl HoldMachine {
    pub fn new(cfg: HoldConfig) -> Self {
        Self {
            cfg,
            state: HoldState::Idle,
            session: HoldSession::default(),
            intensity: 0.0,
            locked: false,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, HoldState::Holding { .. })
    }

    pub fn elapsed(&self) -> f32 {
        match self.state {
            HoldState::Holding { elapsed } => elapsed,
            _ => 0.0,
        }
    }

    /// Smoothed hold amount in [0, 1] for the loader shader.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn in_pulse_phase(&self) -> bool {
        self.is_holding() && self.elapsed() < self.cfg.pulse_phase_sec
    }

    /// Whole seconds left until the ceiling, for the countdown label.
    pub fn seconds_remaining(&self) -> u32 {
        (self.cfg.ceiling_sec - self.elapsed()).max(0.0).ceil() as u32
    }

    /// Pointer pressed. Ignored over UI controls or once the reveal took over.
    pub fn pointer_down(&mut self, over_control: bool) -> bool {
        if self.locked || over_control || self.is_holding() {
            return false;
        }
        self.state = HoldState::Holding { elapsed: 0.0 };
        self.session = HoldSession::default();
        true
    }

    /// Pointer released: back to rest, cyclic cue stopped, default ambience resumed.
    pub fn pointer_up(&mut self) -> AudioCommands {
        let mut out = AudioCommands::new();
        let was_holding = self.is_holding();
        self.state = HoldState::Released;
        self.session = HoldSession::default();
        if was_holding && !self.locked {
            out.push(AudioCommand::Stop(Cue::Sonar));
            out.push(AudioCommand::Stop(Cue::SyntheticMusic));
            out.push(AudioCommand::Play(Cue::LandingIntro));
        }
        out
    }

    /// Permanently hand control to the reveal sequence.
    pub fn lock(&mut self) -> AudioCommands {
        let mut out = AudioCommands::new();
        if self.locked {
            return out;
        }
        self.locked = true;
        if self.is_holding() {
            out.push(AudioCommand::Stop(Cue::Sonar));
        }
        self.state = HoldState::Idle;
        self.intensity = HOLD_REST_INTENSITY;
        out
    }

    /// Advance by `dt` seconds; `clock` is the shared shader clock after this frame's step.
    pub fn tick(&mut self, dt: f32, clock: f32) -> AudioCommands {
        let dt = sanitize_dt(dt);
        let mut out = AudioCommands::new();
        if self.locked {
            self.intensity = HOLD_REST_INTENSITY;
            return out;
        }
        match self.state {
            HoldState::Holding { elapsed } => {
                let elapsed = (elapsed + dt).min(self.cfg.ceiling_sec);
                self.state = HoldState::Holding { elapsed };
                if elapsed < self.cfg.pulse_phase_sec {
                    if wave_reset(clock, dt, self.cfg.cycle_sec) {
                        out.push(AudioCommand::Restart(Cue::Sonar));
                    }
                } else {
                    if !self.session.pulse_stopped {
                        self.session.pulse_stopped = true;
                        out.push(AudioCommand::Stop(Cue::Sonar));
                        out.push(AudioCommand::Pause(Cue::LandingIntro));
                    }
                    if !self.session.mode_cue_played {
                        self.session.mode_cue_played = true;
                        out.push(AudioCommand::Restart(Cue::ModeInitiation));
                    }
                    if !self.session.ambient_started {
                        self.session.ambient_started = true;
                        out.push(AudioCommand::Restart(Cue::SyntheticMusic));
                    }
                }
            }
            HoldState::Released => self.state = HoldState::Idle,
            HoldState::Idle => {}
        }
        let target = if self.is_holding() { 1.0 } else { 0.0 };
        let alpha = (dt * self.cfg.intensity_rate).min(1.0);
        self.intensity += (target - self.intensity) * alpha;
        out
    }
}

impl Default for HoldMachine {
    fn default() -> Self {
        Self::new(HoldConfig::default())
    }
}

/// True when the cycle position wrapped from near 1 back to near 0 during the last `dt`.
#[inline]
pub fn wave_reset(clock: f32, dt: f32, cycle: f32) -> bool {
    if cycle <= 0.0 || dt <= 0.0 {
        return false;
    }
    let cur = clock.rem_euclid(cycle) / cycle;
    let prev = (clock - dt).rem_euclid(cycle) / cycle;
    prev > cur
}
