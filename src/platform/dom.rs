//! DOM helpers
//!
//! Sections re-render by rebuilding their children, so clicks are handled by
//! one delegated listener per section root: the nearest ancestor carrying
//! `data-action` names what was clicked.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions, Window,
};

use super::js_reason;

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// `<tag class="...">`
pub fn element(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// `<tag class="...">text</tag>`
pub fn text_element(doc: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = element(doc, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// A button that reports `action` (and optionally an id) to the section's
/// action handler
pub fn action_button(
    doc: &Document,
    class: &str,
    text: &str,
    action: &str,
    id: Option<&str>,
) -> Result<Element, JsValue> {
    let el = text_element(doc, "button", class, text)?;
    el.set_attribute("type", "button")?;
    el.set_attribute("data-action", action)?;
    if let Some(id) = id {
        el.set_attribute("data-id", id)?;
    }
    Ok(el)
}

/// Remove every child
pub fn clear(el: &Element) {
    el.set_inner_html("");
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force("hidden", hidden);
}

/// A delegated click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub id: Option<String>,
    pub index: Option<usize>,
}

impl Action {
    pub fn from_event(event: &Event) -> Option<Self> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let el = target.closest("[data-action]").ok()??;
        Some(Self {
            name: el.get_attribute("data-action")?,
            id: el.get_attribute("data-id"),
            index: el
                .get_attribute("data-index")
                .and_then(|i| i.parse().ok()),
        })
    }
}

/// Route clicks under `root` to `handler`. Lives as long as the page.
pub fn on_action(root: &Element, mut handler: impl FnMut(Action) + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
        if let Some(action) = Action::from_event(&event) {
            handler(action);
        }
    });
    let _ = root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `f` once after `ms` milliseconds
pub fn after_ms(ms: u32, f: impl FnOnce() + 'static) {
    let Some(window) = window() else { return };
    let callback = Closure::once_into_js(f);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms.min(i32::MAX as u32) as i32,
    ) {
        log::warn!("setTimeout failed: {}", js_reason(&e));
    }
}

/// Smooth-scroll the element with `id` into view
pub fn scroll_to_id(id: &str) {
    let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
        log::warn!("No section #{}", id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn scroll_to_top() {
    let Some(window) = window() else { return };
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("Could not open {}: {}", url, js_reason(&e));
        }
    }
}

/// Write to the clipboard; failures are logged
pub fn copy_text(text: &str) {
    let Some(window) = window() else { return };
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("Clipboard write failed: {}", js_reason(&e));
        }
    });
}
