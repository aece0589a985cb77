use smallvec::SmallVec;

/// Named audio cues and ambient tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Short sonar burst repeated once per pulse cycle while holding.
    Sonar,
    /// One-shot sting when the pulse phase completes.
    ModeInitiation,
    /// Looping track started when the hold passes the pulse phase.
    SyntheticMusic,
    /// Default ambient loop of the landing page.
    LandingIntro,
    ExperienceMusic,
    WindGrass,
}

impl Cue {
    pub const ALL: [Cue; 6] = [
        Cue::Sonar,
        Cue::ModeInitiation,
        Cue::SyntheticMusic,
        Cue::LandingIntro,
        Cue::ExperienceMusic,
        Cue::WindGrass,
    ];

    pub fn url(self) -> &'static str {
        match self {
            Cue::Sonar => "/sounds/SFX/Laser_Sonic_Burst.mp3",
            Cue::ModeInitiation => "/sounds/SFX/Mode_Initiation.mp3",
            Cue::SyntheticMusic => "/sounds/SFX/synthetic-music.mp3",
            Cue::LandingIntro => "/sounds/landing-intro.mp3",
            Cue::ExperienceMusic => "/sounds/experience-background.mp3",
            Cue::WindGrass => "/sounds/SFX/wind-grass.mp3",
        }
    }

    pub fn looping(self) -> bool {
        matches!(
            self,
            Cue::SyntheticMusic | Cue::LandingIntro | Cue::ExperienceMusic | Cue::WindGrass
        )
    }
}

/// Fire-and-forget playback request produced by scene logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    /// Resume from the current position.
    Play(Cue),
    /// Seek to 0 and play.
    Restart(Cue),
    Pause(Cue),
    /// Pause and seek to 0.
    Stop(Cue),
}

pub type AudioCommands = SmallVec<[AudioCommand; 4]>;
