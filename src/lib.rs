#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod core;
mod dom;
mod environment;
mod events;
mod experience;
mod frame;
mod input;
mod landing;
mod overlay;
mod render;

use experience::ExperienceScene;
use landing::LandingScene;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// Stop the frame loop and release the scene when the page is hidden for good.
fn wire_pagehide(handle: frame::LoopHandle, mut teardown: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || {
        handle.stop();
        teardown();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SceneKind {
    Landing,
    Experience,
}

impl SceneKind {
    fn from_body(document: &web::Document) -> Self {
        match dom::body_data(document, "scene").as_deref() {
            Some("experience") => SceneKind::Experience,
            _ => SceneKind::Landing,
        }
    }
}

async fn run_landing(document: web::Document, canvas: web::HtmlCanvasElement) -> anyhow::Result<()> {
    let scene = Rc::new(RefCell::new(
        LandingScene::mount(document.clone(), canvas).await?,
    ));
    events::wire_landing_pointer(&document, scene.clone());
    events::wire_landing_keys(scene.clone());

    let s = scene.clone();
    let handle = frame::start_loop(move |now| {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.frame(now);
        }
    });
    wire_pagehide(handle, move || {
        if let Ok(mut scene) = scene.try_borrow_mut() {
            scene.teardown();
        }
    });
    Ok(())
}

async fn run_experience(
    document: web::Document,
    canvas: web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    let scene = Rc::new(RefCell::new(
        ExperienceScene::mount(document.clone(), canvas.clone()).await?,
    ));
    events::wire_experience_pointer(&document, &canvas, scene.clone());
    events::wire_experience_keys(scene.clone());

    let s = scene.clone();
    let handle = frame::start_loop(move |now| {
        if let Ok(mut scene) = s.try_borrow_mut() {
            scene.frame(now);
        }
    });
    wire_pagehide(handle, move || {
        if let Ok(mut scene) = scene.try_borrow_mut() {
            scene.teardown();
        }
    });
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("penthouse-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let kind = SceneKind::from_body(&document);
    log::info!("mounting {:?} scene", kind);
    match kind {
        SceneKind::Landing => run_landing(document, canvas).await,
        SceneKind::Experience => run_experience(document, canvas).await,
    }
}
