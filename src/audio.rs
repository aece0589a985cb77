use crate::core::constants::{MODE_INITIATION_VOLUME, SYNTHETIC_MUSIC_VOLUME};
use crate::core::cue::{AudioCommand, Cue};
use fnv::FnvHashMap;
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("no audio element for {0:?}")]
    Missing(Cue),
    #[error("play() failed for {cue:?}: {message}")]
    Threw { cue: Cue, message: String },
    #[error("playback of {cue:?} was rejected: {message}")]
    Rejected { cue: Cue, message: String },
}

fn js_message(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{:?}", v))
}

fn default_volume(cue: Cue) -> f64 {
    match cue {
        Cue::ModeInitiation => MODE_INITIATION_VOLUME,
        Cue::SyntheticMusic => SYNTHETIC_MUSIC_VOLUME,
        _ => 1.0,
    }
}

// Create analyser and route it to the speakers
fn create_analyser(audio_ctx: &web::AudioContext) -> Option<web::AnalyserNode> {
    let analyser = web::AnalyserNode::new(audio_ctx).ok()?;
    analyser.set_fft_size(256);
    _ = analyser.connect_with_audio_node(&audio_ctx.destination());
    Some(analyser)
}

/// Audio capability for one mounted scene: one element per cue, routed through an
/// analyser. Dropping the session without `dispose` leaves elements playing.
pub struct AudioSession {
    ctx: Option<web::AudioContext>,
    analyser: Option<web::AnalyserNode>,
    analyser_buf: Vec<f32>,
    elements: FnvHashMap<Cue, web::HtmlAudioElement>,
    muted: bool,
    intro_retry: Rc<Cell<bool>>,
}

impl AudioSession {
    pub fn new(cues: &[Cue]) -> Self {
        let ctx = match web::AudioContext::new() {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("[audio] AudioContext unavailable: {:?}", e);
                None
            }
        };
        let analyser = ctx.as_ref().and_then(create_analyser);
        let mut elements = FnvHashMap::default();
        for &cue in cues {
            let el = match web::HtmlAudioElement::new_with_src(cue.url()) {
                Ok(el) => el,
                Err(e) => {
                    log::warn!("[audio] cannot create element for {:?}: {:?}", cue, e);
                    continue;
                }
            };
            el.set_loop(cue.looping());
            el.set_preload("auto");
            el.set_volume(default_volume(cue));
            if let (Some(ctx), Some(an)) = (&ctx, &analyser) {
                if let Ok(src) = ctx.create_media_element_source(&el) {
                    _ = src.connect_with_audio_node(an);
                }
            }
            elements.insert(cue, el);
        }
        let analyser_buf = analyser
            .as_ref()
            .map(|a| vec![0.0; a.frequency_bin_count() as usize])
            .unwrap_or_default();
        Self {
            ctx,
            analyser,
            analyser_buf,
            elements,
            muted: false,
            intro_retry: Rc::new(Cell::new(false)),
        }
    }

    pub fn element(&self, cue: Cue) -> Option<&web::HtmlAudioElement> {
        self.elements.get(&cue)
    }

    /// Start or resume. A rejected promise is logged and, for the landing intro,
    /// remembered so the next pointer gesture can retry.
    pub fn play(&self, cue: Cue) -> Result<(), PlaybackError> {
        let el = self.elements.get(&cue).ok_or(PlaybackError::Missing(cue))?;
        if let Some(ctx) = &self.ctx {
            _ = ctx.resume();
        }
        let promise = el.play().map_err(|e| PlaybackError::Threw {
            cue,
            message: js_message(&e),
        })?;
        let retry = self.intro_retry.clone();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => {
                    if cue == Cue::LandingIntro {
                        retry.set(false);
                    }
                }
                Err(e) => {
                    let err = PlaybackError::Rejected {
                        cue,
                        message: js_message(&e),
                    };
                    log::debug!("[audio] {}", err);
                    if cue == Cue::LandingIntro {
                        retry.set(true);
                    }
                }
            }
        });
        Ok(())
    }

    pub fn restart(&self, cue: Cue) -> Result<(), PlaybackError> {
        let el = self.elements.get(&cue).ok_or(PlaybackError::Missing(cue))?;
        el.set_current_time(0.0);
        self.play(cue)
    }

    pub fn pause(&self, cue: Cue) -> Result<(), PlaybackError> {
        let el = self.elements.get(&cue).ok_or(PlaybackError::Missing(cue))?;
        _ = el.pause();
        Ok(())
    }

    pub fn stop(&self, cue: Cue) -> Result<(), PlaybackError> {
        let el = self.elements.get(&cue).ok_or(PlaybackError::Missing(cue))?;
        _ = el.pause();
        el.set_current_time(0.0);
        Ok(())
    }

    pub fn set_volume(&self, cue: Cue, volume: f64) {
        if let Some(el) = self.elements.get(&cue) {
            el.set_volume(volume.clamp(0.0, 1.0));
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for el in self.elements.values() {
            el.set_muted(muted);
        }
        log::info!("[audio] muted={}", muted);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Run a command from scene logic; failures are expected under autoplay policy.
    pub fn execute(&self, cmd: AudioCommand) {
        let res = match cmd {
            AudioCommand::Play(c) => self.play(c),
            AudioCommand::Restart(c) => self.restart(c),
            AudioCommand::Pause(c) => self.pause(c),
            AudioCommand::Stop(c) => self.stop(c),
        };
        if let Err(e) = res {
            log::debug!("[audio] {:?} failed: {}", cmd, e);
        }
    }

    pub fn execute_all(&self, cmds: impl IntoIterator<Item = AudioCommand>) {
        for c in cmds {
            self.execute(c);
        }
    }

    /// Retry the landing intro once after an earlier rejection.
    pub fn retry_intro_if_blocked(&self) {
        if self.intro_retry.replace(false) {
            log::debug!("[audio] retrying landing intro");
            self.execute(AudioCommand::Play(Cue::LandingIntro));
        }
    }

    /// Average loudness of the low bins in [0, 1].
    pub fn level(&mut self) -> f32 {
        let Some(a) = &self.analyser else {
            return 0.0;
        };
        let bins = a.frequency_bin_count() as usize;
        if self.analyser_buf.len() != bins {
            self.analyser_buf.resize(bins, 0.0);
        }
        a.get_float_frequency_data(&mut self.analyser_buf);
        let take = bins.min(16);
        if take == 0 {
            return 0.0;
        }
        let sum: f32 = self.analyser_buf[..take]
            .iter()
            .map(|v| ((v + 100.0) / 100.0).clamp(0.0, 1.0))
            .sum();
        sum / take as f32
    }

    pub fn stop_all(&self) {
        for &cue in self.elements.keys() {
            _ = self.stop(cue);
        }
    }

    pub fn dispose(&mut self) {
        self.stop_all();
        if let Some(ctx) = self.ctx.take() {
            _ = ctx.close();
        }
        self.analyser = None;
        log::info!("[audio] session disposed");
    }
}
