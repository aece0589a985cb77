use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Seconds since page load, from the high resolution clock.
pub fn now_sec() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    web::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// Page scroll position as a fraction of the scrollable extent.
pub fn scroll_progress(document: &web::Document) -> f32 {
    let Some(w) = web::window() else {
        return 0.0;
    };
    let Some(root) = document.document_element() else {
        return 0.0;
    };
    let viewport = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let extent = root.scroll_height() as f64 - viewport;
    if extent <= 0.0 {
        return 0.0;
    }
    (scroll_y() / extent).clamp(0.0, 1.0) as f32
}

/// True when a pointer event started on a button or link.
pub fn is_over_control(ev: &web::Event) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest("button, a, [role=button]").ok().flatten())
        .is_some()
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    {
        _ = el.style().set_property(property, value);
    }
}

pub fn set_body_overflow(document: &web::Document, value: &str) {
    if let Some(body) = document.body() {
        _ = body.style().set_property("overflow", value);
    }
}

pub fn body_data(document: &web::Document, key: &str) -> Option<String> {
    document.body().and_then(|b| b.get_attribute(&format!("data-{}", key)))
}

pub fn dispatch(name: &str) {
    if let Some(w) = web::window() {
        if let Ok(ev) = web::Event::new(name) {
            _ = w.dispatch_event(&ev);
        }
    }
}

pub fn dispatch_detail(name: &str, detail: &wasm_bindgen::JsValue) {
    if let Some(w) = web::window() {
        let init = web::CustomEventInit::new();
        init.set_detail(detail);
        if let Ok(ev) = web::CustomEvent::new_with_event_init_dict(name, &init) {
            _ = w.dispatch_event(&ev);
        }
    }
}

pub fn navigate(path: &str) {
    if let Some(w) = web::window() {
        log::info!("[nav] -> {}", path);
        _ = w.location().set_href(path);
    }
}

pub fn local_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}
