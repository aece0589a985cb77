use crate::experience::ExperienceScene;
use crate::landing::LandingScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn is_debug_toggle_key(key: &str) -> bool {
    key == "`"
}

// Backtick toggles the scroll debug panel.
pub fn wire_landing_keys(scene: Rc<RefCell<LandingScene>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if is_debug_toggle_key(&ev.key()) {
                    if let Ok(mut scene) = scene.try_borrow_mut() {
                        scene.toggle_debug();
                    }
                    ev.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_experience_keys(scene: Rc<RefCell<ExperienceScene>>) {
    let Some(window) = web::window() else {
        return;
    };
    for (event, pressed) in [("keydown", true), ("keyup", false)] {
        let scene = scene.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                let consumed = scene
                    .try_borrow_mut()
                    .map(|mut s| s.on_key(&ev.key(), pressed))
                    .unwrap_or(false);
                // keep Space and the arrows from scrolling the page
                if consumed {
                    ev.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
