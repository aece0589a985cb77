use crate::core::materials::{Globals, PostParams};
use crate::core::Camera;
use crate::dom;
use crate::render;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Clamp frame deltas so a backgrounded tab resumes without a giant step.
#[inline]
pub fn frame_delta(last: f64, now: f64) -> f32 {
    (now - last).clamp(0.0, 0.25) as f32
}

/// Resize, upload and draw one frame; surface loss triggers a reconfigure.
pub fn render_frame(
    gpu: &mut render::GpuState<'static>,
    canvas: &web::HtmlCanvasElement,
    camera: &mut Camera,
    time: f32,
    mouse: [f32; 2],
    post: &PostParams,
) {
    gpu.resize_if_needed(canvas.width(), canvas.height());
    let size = gpu.size();
    camera.set_aspect(size.0, size.1);
    let globals = Globals::new(camera.view_proj(), camera.position, time, size, mouse);
    match gpu.render(&globals, post) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
        Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
    }
}

/// Running requestAnimationFrame loop; `stop` detaches it.
#[derive(Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

pub fn start_loop(mut tick: impl FnMut(f64) + 'static) -> LoopHandle {
    let handle = LoopHandle {
        running: Rc::new(Cell::new(true)),
        raf_id: Rc::new(Cell::new(None)),
    };
    let cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let cb_inner = cb.clone();
    let h = handle.clone();
    *cb.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !h.running.get() {
            return;
        }
        tick(dom::now_sec());
        if let (Some(w), Some(f)) = (web::window(), cb_inner.borrow().as_ref()) {
            h.raf_id
                .set(w.request_animation_frame(f.as_ref().unchecked_ref()).ok());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(f)) = (web::window(), cb.borrow().as_ref()) {
        handle
            .raf_id
            .set(w.request_animation_frame(f.as_ref().unchecked_ref()).ok());
    }
    handle
}
