use crate::core::constants::{ENTER_REVEAL_DELAY_SEC, HOLD_CEILING_SEC};
use crate::core::cue::{AudioCommand, AudioCommands, Cue};
use crate::core::easing::sanitize_dt;
use crate::core::hold::HoldMachine;
use crate::core::reveal::{RevealEvent, RevealSequence};
use glam::Vec2;

/// Counts loaded assets; 100% gates the proceed control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetProgress {
    loaded: u32,
    total: u32,
}

impl AssetProgress {
    pub fn new(total: u32) -> Self {
        Self { loaded: 0, total }
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = (self.loaded + 1).min(self.total);
    }

    /// Sync with a counter fed by load events; never moves backwards.
    pub fn set_loaded(&mut self, n: u32) {
        self.loaded = self.loaded.max(n.min(self.total));
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 100.0;
        }
        self.loaded as f32 / self.total as f32 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

/// Reveals the proceed control a short moment after loading finishes.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnterGate {
    completed_at: Option<f64>,
}

impl EnterGate {
    pub fn update(&mut self, progress: &AssetProgress, now: f64) -> bool {
        if progress.is_complete() && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
        self.is_visible(now)
    }

    pub fn is_visible(&self, now: f64) -> bool {
        self.completed_at
            .map(|t| now - t >= ENTER_REVEAL_DELAY_SEC)
            .unwrap_or(false)
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// Heading and countdown for the hold indicator.
pub fn hold_labels(holding: bool, seconds_remaining: u32) -> (&'static str, String) {
    if holding {
        ("KEEP HOLDING...", format!("({} Seconds)", seconds_remaining))
    } else {
        (
            "HOLD TO REVEAL",
            format!("({} Seconds)", HOLD_CEILING_SEC as u32),
        )
    }
}

/// Uniform values feeding the loader shard material.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoaderDrive {
    pub time: f32,
    pub mouse: Vec2,
    pub hold: f32,
    pub hold_time: f32,
    pub glow: f32,
    pub shatter: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PreloaderFrame {
    pub commands: AudioCommands,
    pub completed: bool,
}

/// Pre-loader state: shader clock, hold machine and reveal sequence.
#[derive(Clone, Debug, Default)]
pub struct Preloader {
    clock: f32,
    mouse: Vec2,
    hold: HoldMachine,
    reveal: RevealSequence,
}

impl Preloader {
    pub fn new(hold: HoldMachine, reveal: RevealSequence) -> Self {
        Self {
            clock: 0.0,
            mouse: Vec2::ZERO,
            hold,
            reveal,
        }
    }

    pub fn hold(&self) -> &HoldMachine {
        &self.hold
    }

    pub fn set_mouse(&mut self, ndc: Vec2) {
        self.mouse = ndc;
    }

    pub fn pointer_down(&mut self, over_control: bool) -> bool {
        !self.reveal.is_started() && self.hold.pointer_down(over_control)
    }

    pub fn pointer_up(&mut self) -> AudioCommands {
        self.hold.pointer_up()
    }

    /// The proceed control was pressed: freeze hold tracking and start the reveal.
    pub fn start_reveal(&mut self) -> AudioCommands {
        if self.reveal.start() {
            log::info!("[reveal] sequence started");
            self.hold.lock()
        } else {
            AudioCommands::new()
        }
    }

    pub fn tick(&mut self, dt: f32) -> PreloaderFrame {
        let dt = sanitize_dt(dt);
        self.clock += dt;
        let mut frame = PreloaderFrame {
            commands: self.hold.tick(dt, self.clock),
            completed: false,
        };
        if let Some(RevealEvent::Completed) = self.reveal.tick(dt) {
            log::info!("[reveal] complete");
            frame.completed = true;
            frame.commands.extend(finish_commands());
        }
        frame
    }

    pub fn drive(&self) -> LoaderDrive {
        LoaderDrive {
            time: self.clock,
            mouse: self.mouse,
            hold: self.hold.intensity(),
            hold_time: self.hold.elapsed(),
            glow: self.reveal.glow(),
            shatter: self.reveal.shatter(),
        }
    }
}

/// Audio hand-over from the pre-loader to the main experience.
pub fn finish_commands() -> AudioCommands {
    let mut out = AudioCommands::new();
    out.push(AudioCommand::Stop(Cue::SyntheticMusic));
    out.push(AudioCommand::Stop(Cue::LandingIntro));
    out.push(AudioCommand::Play(Cue::ExperienceMusic));
    out.push(AudioCommand::Play(Cue::WindGrass));
    out
}
