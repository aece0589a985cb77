use crate::core::camera::normalize_pointer;
use glam::Vec2;
use web_sys as web;

#[inline]
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dim(w.inner_width()), dim(w.inner_height()))
}

/// Pointer position in [-1, 1] x [-1, 1] over the viewport, +Y up.
#[inline]
pub fn pointer_ndc(ev: &web::MouseEvent) -> Vec2 {
    let (w, h) = viewport_size();
    normalize_pointer(ev.client_x() as f32, ev.client_y() as f32, w, h)
}

/// Relative motion reported while the pointer is locked.
#[inline]
pub fn pointer_delta(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.movement_x() as f32, ev.movement_y() as f32)
}
