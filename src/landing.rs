use crate::audio::AudioSession;
use crate::core::camera::euler_xyz;
use crate::core::constants::{
    DOOR_LEFT_NAME, DOOR_RIGHT_NAME, DROP_PART_NAME, EXPERIENCE_PATH, LANDING_FOV_DEG,
    PENTHOUSE_OFFSET, PENTHOUSE_SCALE, PRELOADER_CAMERA_POS, PRELOADER_FADE_SEC,
    PRELOADER_FOV_DEG, PRELOADER_MODEL_POS, ZFAR, ZNEAR,
};
use crate::core::geometry::{self, ShardVertex};
use crate::core::materials::{LoaderParams, PostParams};
use crate::core::navigation::GateEvent;
use crate::core::phase::PhaseId;
use crate::core::preloader::{greeting_for_hour, hold_labels, AssetProgress, EnterGate};
use crate::core::scene::NodeId;
use crate::core::scroll_scene::{debug_lines, scroll_indicator};
use crate::core::{
    AudioCommand, Camera, Cue, DoorHandles, Preloader, SceneGraph, ScrollScene, TimelineConfig,
};
use crate::render::{DrawId, GpuState};
use crate::{dom, environment, frame, overlay};
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const SHARD_SEED: u64 = 42;
const PRELOADER_MODEL_SCALE: f32 = 0.5;
const PRELOADER_CLEAR: [f32; 3] = [0.02, 0.02, 0.03];
const SKY_CLEAR: [f32; 3] = [0.75, 0.85, 0.92];
// HTMLMediaElement.HAVE_ENOUGH_DATA
const HAVE_ENOUGH_DATA: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Preloader,
    Scroll { entered_at: f64 },
}

/// Landing page: shard pre-loader, then the scroll-driven penthouse approach.
pub struct LandingScene {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState<'static>,
    audio: AudioSession,

    preloader: Preloader,
    assets: AssetProgress,
    enter_gate: EnterGate,
    enter_shown: bool,
    loaded: Rc<Cell<u32>>,
    shards: DrawId,
    loader_params: LoaderParams,
    preloader_camera: Camera,

    scroll: ScrollScene,
    graph: SceneGraph,
    doors: DoorHandles,
    door_draws: Vec<(NodeId, DrawId)>,
    scene_draws: Vec<DrawId>,
    camera: Camera,
    last_phase: Option<PhaseId>,

    mode: Mode,
    last_now: Option<f64>,
    time: f32,
    mouse: Vec2,
    debug_visible: bool,
    navigated: bool,
}

fn shard_soup(rng: &mut StdRng) -> Vec<ShardVertex> {
    let mut out = Vec::new();
    for part in geometry::penthouse_model() {
        let local = Mat4::from_rotation_translation(
            euler_xyz(part.transform.rotation),
            part.transform.position,
        );
        let mesh = part.mesh.transformed(local);
        out.extend(geometry::to_shards(&mesh, rng, part.name == DROP_PART_NAME));
    }
    out
}

// Count each audio element once, whether it finished buffering or failed.
fn track_audio_loads(audio: &AudioSession, counter: &Rc<Cell<u32>>) {
    for cue in Cue::ALL {
        let Some(el) = audio.element(cue) else {
            counter.set(counter.get() + 1);
            continue;
        };
        if el.ready_state() >= HAVE_ENOUGH_DATA {
            counter.set(counter.get() + 1);
            continue;
        }
        let counted = Rc::new(Cell::new(false));
        for event in ["canplaythrough", "error"] {
            let counter = counter.clone();
            let counted = counted.clone();
            let closure = Closure::wrap(Box::new(move || {
                if !counted.replace(true) {
                    counter.set(counter.get() + 1);
                }
            }) as Box<dyn FnMut()>);
            _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

impl LandingScene {
    pub async fn mount(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
    ) -> anyhow::Result<Self> {
        let mut gpu = frame::init_gpu(&canvas)
            .await
            .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;
        gpu.set_clear_color(PRELOADER_CLEAR);

        let variant = canvas.get_attribute("data-variant");
        let config = TimelineConfig::from_variant(variant.as_deref());
        let scroll = ScrollScene::new(&config)?;
        log::info!(
            "[scroll] {} phases over {:.1}s",
            scroll.phases().len(),
            scroll.timeline().duration()
        );

        let audio = AudioSession::new(&Cue::ALL);
        let loaded = Rc::new(Cell::new(0));
        track_audio_loads(&audio, &loaded);
        // geometry counts as the final asset
        let assets = AssetProgress::new(Cue::ALL.len() as u32 + 1);

        // Pre-loader shards
        let mut rng = StdRng::seed_from_u64(SHARD_SEED);
        let soup = shard_soup(&mut rng);
        log::info!("[assets] loader shards: {} triangles", soup.len() / 3);
        let loader_params = LoaderParams::default();
        let shard_model = Mat4::from_scale_rotation_translation(
            Vec3::splat(PRELOADER_MODEL_SCALE),
            glam::Quat::IDENTITY,
            Vec3::from(PRELOADER_MODEL_POS),
        );
        let shards = gpu.add_shards("loader_shards", &soup, shard_model, &loader_params);

        // Penthouse and surroundings, hidden until the reveal completes
        let mut graph = SceneGraph::new();
        let root = graph.add(
            "penthouse",
            None,
            environment::root_transform(Vec3::from(PENTHOUSE_OFFSET)),
            Vec3::splat(PENTHOUSE_SCALE),
        );
        let parts = geometry::penthouse_model();
        let part_draws = environment::add_model_parts(&mut gpu, &mut graph, root, &parts);
        let doors = DoorHandles::resolve(&graph, DOOR_LEFT_NAME, DOOR_RIGHT_NAME);
        let door_draws: Vec<(NodeId, DrawId)> = part_draws
            .iter()
            .copied()
            .filter(|(node, _)| Some(*node) == doors.left || Some(*node) == doors.right)
            .collect();
        let mut scene_draws: Vec<DrawId> = part_draws.iter().map(|&(_, d)| d).collect();
        scene_draws.push(environment::add_ground(&mut gpu, 400.0, 0.0));
        scene_draws.push(environment::add_city(&mut gpu, Vec3::new(0.0, 0.0, -40.0)));
        scene_draws.push(environment::add_water(&mut gpu, 600.0, 128, Vec3::new(0.0, 0.05, 360.0)));
        scene_draws.extend(environment::add_clouds(&mut gpu, 90.0));
        for &d in &scene_draws {
            gpu.set_visible(d, false);
        }
        loaded.set(loaded.get() + 1);

        let mut preloader_camera = Camera::new(PRELOADER_FOV_DEG, 1.0, ZNEAR, ZFAR);
        preloader_camera.look_at(
            Vec3::from(PRELOADER_CAMERA_POS),
            Vec3::from(PRELOADER_MODEL_POS),
        );
        let mut camera = Camera::new(LANDING_FOV_DEG, 1.0, ZNEAR, ZFAR);
        camera.set_transform(&scroll.timeline().initial().camera());

        dom::set_body_overflow(&document, "hidden");
        overlay::init_preloader(&document, greeting_for_hour(dom::local_hour()));
        overlay::set_sound_label(&document, false);
        overlay::hide(&document, overlay::SCROLL_INDICATOR);
        overlay::set_opacity(&document, overlay::NAV_OVERLAY, 0.0);
        audio.execute(AudioCommand::Play(Cue::LandingIntro));
        log::info!("[landing] mounted");

        Ok(Self {
            document,
            canvas,
            gpu,
            audio,
            preloader: Preloader::default(),
            assets,
            enter_gate: EnterGate::default(),
            enter_shown: false,
            loaded,
            shards,
            loader_params,
            preloader_camera,
            scroll,
            graph,
            doors,
            door_draws,
            scene_draws,
            camera,
            last_phase: None,
            mode: Mode::Preloader,
            last_now: None,
            time: 0.0,
            mouse: Vec2::ZERO,
            debug_visible: false,
            navigated: false,
        })
    }

    pub fn on_pointer_down(&mut self, over_control: bool) {
        if self.mode == Mode::Preloader && self.preloader.pointer_down(over_control) {
            log::info!("[hold] started");
        }
    }

    pub fn on_pointer_up(&mut self) {
        if self.mode == Mode::Preloader {
            let cmds = self.preloader.pointer_up();
            self.audio.execute_all(cmds);
        }
    }

    pub fn on_pointer_move(&mut self, ndc: Vec2) {
        self.mouse = ndc;
        self.preloader.set_mouse(ndc);
        self.audio.retry_intro_if_blocked();
    }

    pub fn on_enter(&mut self) {
        if self.mode != Mode::Preloader || !self.enter_shown {
            return;
        }
        let cmds = self.preloader.start_reveal();
        self.audio.execute_all(cmds);
        overlay::hide(&self.document, overlay::ENTER_BUTTON);
        overlay::hide(&self.document, overlay::HOLD_INDICATOR);
    }

    pub fn toggle_sound(&mut self) {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        overlay::set_sound_label(&self.document, muted);
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        overlay::set_visible(&self.document, overlay::DEBUG_PANEL, self.debug_visible);
    }

    pub fn frame(&mut self, now: f64) {
        let dt = self
            .last_now
            .map(|last| frame::frame_delta(last, now))
            .unwrap_or(0.0);
        self.last_now = Some(now);
        self.time += dt;
        match self.mode {
            Mode::Preloader => self.preloader_frame(dt, now),
            Mode::Scroll { entered_at } => self.scroll_frame(dt, now, entered_at),
        }
    }

    fn preloader_frame(&mut self, dt: f32, now: f64) {
        self.assets.set_loaded(self.loaded.get());
        overlay::update_percent(&self.document, self.assets.percent());
        if self.enter_gate.update(&self.assets, now) && !self.enter_shown {
            self.enter_shown = true;
            overlay::show(&self.document, overlay::ENTER_BUTTON);
        }

        let out = self.preloader.tick(dt);
        self.audio.execute_all(out.commands);

        let hold = self.preloader.hold();
        let (title, seconds) = hold_labels(hold.is_holding(), hold.seconds_remaining());
        overlay::update_hold(&self.document, title, &seconds, hold.is_holding());

        let drive = self.preloader.drive();
        let level = self.audio.level();
        self.loader_params.update(&drive, level);
        self.gpu.set_params(self.shards, &self.loader_params);

        if out.completed {
            self.enter_scroll(now);
            return;
        }
        frame::render_frame(
            &mut self.gpu,
            &self.canvas,
            &mut self.preloader_camera,
            drive.time,
            drive.mouse.to_array(),
            &PostParams::default(),
        );
    }

    fn enter_scroll(&mut self, now: f64) {
        self.gpu.set_visible(self.shards, false);
        for &d in &self.scene_draws {
            self.gpu.set_visible(d, true);
        }
        self.gpu.set_clear_color(SKY_CLEAR);
        dom::set_body_overflow(&self.document, "auto");
        dom::dispatch("experience:start");
        overlay::show(&self.document, overlay::SCROLL_INDICATOR);
        self.mode = Mode::Scroll { entered_at: now };
        log::info!("[landing] scroll scene active");
    }

    fn scroll_frame(&mut self, dt: f32, now: f64, entered_at: f64) {
        let fade = (1.0 - (now - entered_at) as f32 / PRELOADER_FADE_SEC).clamp(0.0, 1.0);
        overlay::set_opacity(&self.document, overlay::PRELOADER, fade as f64);
        if fade <= 0.0 && !overlay::is_hidden(&self.document, overlay::PRELOADER) {
            overlay::hide(&self.document, overlay::PRELOADER);
        }

        let raw = dom::scroll_progress(&self.document);
        let f = self.scroll.update(raw, dt, now);
        if f.nav == Some(GateEvent::Navigate) && !self.navigated {
            self.navigated = true;
            dom::navigate(EXPERIENCE_PATH);
        }
        overlay::set_opacity(&self.document, overlay::NAV_OVERLAY, f.overlay_opacity as f64);

        let label = self.scroll.label(f.phase);
        if self.last_phase != Some(f.phase) {
            self.last_phase = Some(f.phase);
            dom::set_text(&self.document, overlay::PHASE_LABEL, label);
        }
        let (opacity, offset) = scroll_indicator(dom::scroll_y());
        overlay::update_scroll_indicator(&self.document, opacity, offset);
        if self.debug_visible {
            overlay::update_debug(&self.document, &debug_lines(&f, label));
        }

        self.camera.set_transform(&f.pose.camera());
        if self.doors.apply(&mut self.graph, &f.pose) {
            for &(node, draw) in &self.door_draws {
                self.gpu.set_model(draw, self.graph.world_matrix(node));
            }
        }

        let post = PostParams::with_fade(fade.max(f.overlay_opacity));
        frame::render_frame(
            &mut self.gpu,
            &self.canvas,
            &mut self.camera,
            self.time,
            self.mouse.to_array(),
            &post,
        );
    }

    /// Page is going away: stop pending navigation and release audio.
    pub fn teardown(&mut self) {
        self.scroll.cancel();
        self.audio.dispose();
        log::info!("[landing] torn down");
    }
}
