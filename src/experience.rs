use crate::audio::AudioSession;
use crate::core::constants::{EXPERIENCE_FOV_DEG, LANDING_PATH, ZFAR, ZNEAR};
use crate::core::first_person::{
    cursor_toggle_detail, is_exit_key, move_key_for, FirstPersonController, LockCooldown,
    MoveIntent,
};
use crate::core::materials::PostParams;
use crate::core::{Camera, Cue};
use crate::render::GpuState;
use crate::{dom, environment, frame, overlay};
use glam::{Vec2, Vec3};
use wasm_bindgen::JsValue;
use web_sys as web;

const START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 20.0);
const WALK_BOUNDS: f32 = 150.0;
const SKY_CLEAR: [f32; 3] = [0.72, 0.83, 0.92];

/// First-person walk through the city, water plaza and cloud layer.
pub struct ExperienceScene {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState<'static>,
    audio: AudioSession,
    controller: FirstPersonController,
    intent: MoveIntent,
    cooldown: LockCooldown,
    camera: Camera,
    locked: bool,
    last_now: Option<f64>,
    time: f32,
    mouse: Vec2,
}

impl ExperienceScene {
    pub async fn mount(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
    ) -> anyhow::Result<Self> {
        let mut gpu = frame::init_gpu(&canvas)
            .await
            .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;
        gpu.set_clear_color(SKY_CLEAR);
        environment::add_ground(&mut gpu, 2.0 * WALK_BOUNDS + 100.0, 0.0);
        environment::add_city(&mut gpu, Vec3::ZERO);
        environment::add_water(&mut gpu, 24.0, 96, Vec3::new(0.0, 0.05, 0.0));
        environment::add_clouds(&mut gpu, 120.0);

        // Nothing from the landing page keeps playing here.
        let audio = AudioSession::new(&[Cue::ExperienceMusic, Cue::WindGrass]);
        audio.stop_all();

        let controller = FirstPersonController::new(START_POSITION, 0.0, WALK_BOUNDS);
        let mut camera = Camera::new(EXPERIENCE_FOV_DEG, 1.0, ZNEAR, ZFAR);
        camera.position = controller.eye();
        camera.orientation = controller.orientation();
        overlay::set_navigation_locked(&document, false);
        log::info!("[experience] mounted");

        Ok(Self {
            document,
            canvas,
            gpu,
            audio,
            controller,
            intent: MoveIntent::default(),
            cooldown: LockCooldown::default(),
            camera,
            locked: false,
            last_now: None,
            time: 0.0,
            mouse: Vec2::ZERO,
        })
    }

    /// Canvas click: ask for pointer lock unless a lock change just happened.
    pub fn on_click(&mut self, now: f64) {
        if self.locked || !self.cooldown.can_request(now) {
            return;
        }
        self.canvas.request_pointer_lock();
    }

    pub fn on_pointer_lock_change(&mut self, now: f64) {
        let canvas: &web::Element = self.canvas.as_ref();
        let locked = self.document.pointer_lock_element().as_ref() == Some(canvas);
        if locked == self.locked {
            return;
        }
        self.locked = locked;
        self.cooldown.lock_changed(locked, now);
        if !locked {
            self.intent.clear();
        }
        overlay::set_navigation_locked(&self.document, locked);
        let (key, hide) = cursor_toggle_detail(locked);
        let detail = js_sys::Object::new();
        _ = js_sys::Reflect::set(&detail, &JsValue::from_str(key), &JsValue::from_bool(hide));
        dom::dispatch_detail("cursor:toggle", &JsValue::from(detail));
        log::info!("[experience] pointer lock={}", locked);
    }

    pub fn on_mouse_move(&mut self, ndc: Vec2, delta: Vec2) {
        self.mouse = ndc;
        if self.locked {
            self.controller.look(delta.x, delta.y);
        }
    }

    /// Returns true when the key was consumed.
    pub fn on_key(&mut self, key: &str, pressed: bool) -> bool {
        if pressed && is_exit_key(key) {
            dom::navigate(LANDING_PATH);
            return true;
        }
        match move_key_for(key) {
            Some(k) => {
                self.intent.set(k, pressed);
                true
            }
            None => false,
        }
    }

    pub fn frame(&mut self, now: f64) {
        let dt = self
            .last_now
            .map(|last| frame::frame_delta(last, now))
            .unwrap_or(0.0);
        self.last_now = Some(now);
        self.time += dt;

        self.controller.tick(dt, &self.intent);
        self.camera.position = self.controller.eye();
        self.camera.orientation = self.controller.orientation();

        frame::render_frame(
            &mut self.gpu,
            &self.canvas,
            &mut self.camera,
            self.time,
            self.mouse.to_array(),
            &PostParams::default(),
        );
    }

    pub fn teardown(&mut self) {
        self.audio.dispose();
        log::info!("[experience] torn down");
    }
}
