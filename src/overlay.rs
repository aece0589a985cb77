use crate::dom;
use web_sys as web;

// Element ids shared with the page markup.
pub const PRELOADER: &str = "preloader";
pub const PRELOADER_GREETING: &str = "preloader-greeting";
pub const PRELOADER_PERCENT: &str = "preloader-percent";
pub const ENTER_BUTTON: &str = "enter-button";
pub const HOLD_INDICATOR: &str = "hold-indicator";
pub const HOLD_TITLE: &str = "hold-title";
pub const HOLD_SECONDS: &str = "hold-seconds";
pub const SOUND_TOGGLE: &str = "sound-toggle";
pub const SCROLL_INDICATOR: &str = "scroll-indicator";
pub const PHASE_LABEL: &str = "phase-label";
pub const DEBUG_PANEL: &str = "debug-panel";
pub const DEBUG_TOGGLE: &str = "debug-toggle";
pub const NAV_OVERLAY: &str = "nav-overlay";
pub const NAVIGATION_HUD: &str = "navigation-hud";
pub const EXPERIENCE_OVERLAY: &str = "experience-overlay";
pub const START_PROMPT: &str = "start-prompt";

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        dom::set_style(document, id, "display", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        // fallback
        dom::set_style(document, id, "display", "none");
    }
}

#[inline]
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    if visible {
        show(document, id);
    } else {
        hide(document, id);
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(true)
}

pub fn set_opacity(document: &web::Document, id: &str, opacity: f64) {
    dom::set_style(document, id, "opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)));
}

// ---------------- Landing pre-loader ----------------

pub fn init_preloader(document: &web::Document, greeting: &str) {
    dom::set_text(document, PRELOADER_GREETING, greeting);
    dom::set_text(document, PRELOADER_PERCENT, "0%");
    hide(document, ENTER_BUTTON);
    show(document, PRELOADER);
}

pub fn update_percent(document: &web::Document, percent: f32) {
    dom::set_text(document, PRELOADER_PERCENT, &format!("{:.0}%", percent));
}

pub fn update_hold(document: &web::Document, title: &str, seconds: &str, holding: bool) {
    dom::set_text(document, HOLD_TITLE, title);
    dom::set_text(document, HOLD_SECONDS, seconds);
    if let Some(el) = document.get_element_by_id(HOLD_INDICATOR) {
        _ = el.class_list().toggle_with_force("holding", holding);
    }
}

pub fn set_sound_label(document: &web::Document, muted: bool) {
    dom::set_text(document, SOUND_TOGGLE, if muted { "Sound Off" } else { "Sound On" });
}

// ---------------- Scroll scene ----------------

pub fn update_scroll_indicator(document: &web::Document, opacity: f64, offset_px: f64) {
    set_opacity(document, SCROLL_INDICATOR, opacity);
    dom::set_style(
        document,
        SCROLL_INDICATOR,
        "transform",
        &format!("translate(-50%, {:.1}px)", offset_px),
    );
}

pub fn update_debug(document: &web::Document, lines: &[String]) {
    if let Some(el) = document.get_element_by_id(DEBUG_PANEL) {
        el.set_text_content(Some(&lines.join("\n")));
    }
}

// ---------------- Experience ----------------

pub fn set_navigation_locked(document: &web::Document, locked: bool) {
    set_visible(document, NAVIGATION_HUD, locked);
    set_visible(document, EXPERIENCE_OVERLAY, !locked);
    set_visible(document, START_PROMPT, !locked);
}
