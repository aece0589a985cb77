use crate::dom;
use crate::experience::ExperienceScene;
use crate::input;
use crate::landing::LandingScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

fn on_window<E: FromWasmAbi + 'static>(event: &str, handler: impl FnMut(E) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Hold gesture, pointer parallax and the pre-loader buttons.
pub fn wire_landing_pointer(document: &web::Document, scene: Rc<RefCell<LandingScene>>) {
    let s = scene.clone();
    on_window("pointerdown", move |ev: web::PointerEvent| {
        let over_control = dom::is_over_control(&ev);
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_pointer_down(over_control);
        }
    });

    let s = scene.clone();
    on_window("pointerup", move |_ev: web::PointerEvent| {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_pointer_up();
        }
    });

    // A pointer leaving the window ends the hold like a release.
    let s = scene.clone();
    on_window("pointercancel", move |_ev: web::PointerEvent| {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_pointer_up();
        }
    });

    let s = scene.clone();
    on_window("pointermove", move |ev: web::PointerEvent| {
        let ndc = input::pointer_ndc(&ev);
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_pointer_move(ndc);
        }
    });

    let s = scene.clone();
    dom::add_click_listener(document, crate::overlay::ENTER_BUTTON, move || {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_enter();
        }
    });

    let s = scene.clone();
    dom::add_click_listener(document, crate::overlay::SOUND_TOGGLE, move || {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.toggle_sound();
        }
    });

    dom::add_click_listener(document, crate::overlay::DEBUG_TOGGLE, move || {
        if let Ok(mut scene) = scene.try_borrow_mut() {
            scene.toggle_debug();
        }
    });
}

/// Click-to-lock, mouse look and lock state tracking.
pub fn wire_experience_pointer(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    scene: Rc<RefCell<ExperienceScene>>,
) {
    let s = scene.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_click(dom::now_sec());
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();

    let s = scene.clone();
    on_window("mousemove", move |ev: web::MouseEvent| {
        let ndc = input::pointer_ndc(&ev);
        let delta = input::pointer_delta(&ev);
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.on_mouse_move(ndc, delta);
        }
    });

    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        if let Ok(mut scene) = scene.try_borrow_mut() {
            scene.on_pointer_lock_change(dom::now_sec());
        }
    }) as Box<dyn FnMut(_)>);
    _ = document
        .add_event_listener_with_callback("pointerlockchange", closure.as_ref().unchecked_ref());
    closure.forget();
}
