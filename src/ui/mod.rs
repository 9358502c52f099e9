//! Page sections (WASM only)
//!
//! Each section owns one root element, rebuilds its children on every state
//! change and routes clicks through a delegated action listener.

pub mod bgm;
pub mod memories;
pub mod menu;
pub mod quests;
pub mod songs;

use wasm_bindgen::JsValue;

use crate::platform::js_reason;

/// Log a failed re-render; the previous DOM stays in place
pub(crate) fn report(section: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("Failed to render {}: {}", section, js_reason(&e));
    }
}
