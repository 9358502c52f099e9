//! Browser platform layer (WASM only)
//!
//! - `storage`: LocalStorage backend for the durable store
//! - `scheduler`: deferred store writes on the microtask queue
//! - `fetch`: static JSON documents
//! - `dom`: element helpers, delegated click actions, timers, scrolling

pub mod dom;
pub mod fetch;
pub mod scheduler;
pub mod storage;

pub use scheduler::Microtask;
pub use storage::LocalStorage;

use wasm_bindgen::JsValue;

/// Readable text for a thrown JS value
pub fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
