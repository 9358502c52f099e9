//! Radial menu and the "back to menu" control

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::report;
use crate::menu::{MENU_ITEMS, MenuItem, Navigator, Section};
use crate::platform::dom::{self, Action};

fn menu_button(doc: &Document, item: &MenuItem) -> Result<Element, JsValue> {
    let pos = item.position_percent();
    let button = dom::element(doc, "button", "menu-item")?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", "go")?;
    button.set_attribute("data-id", item.section.as_str())?;
    button.set_attribute("style", &format!("left: {:.3}%; top: {:.3}%", pos.x, pos.y))?;
    button.set_attribute("aria-label", &format!("Navigate to {}", item.label))?;

    button.append_child(&dom::element(doc, "span", "menu-dot")?)?;
    button.append_child(&dom::text_element(doc, "span", "menu-label", item.label)?)?;
    Ok(button)
}

fn render(doc: &Document, root: &Element) -> Result<(), JsValue> {
    for item in &MENU_ITEMS {
        root.append_child(&menu_button(doc, item)?)?;
    }
    Ok(())
}

/// Place the menu items in `root` and wire navigation.
/// `back` is the floating control shown while a section is active.
pub fn mount(root: Element, back: Option<Element>, scroll_delay_ms: u32) {
    let Some(doc) = dom::document() else { return };
    report("menu", render(&doc, &root));

    let nav = Rc::new(RefCell::new(Navigator::new()));
    if let Some(back) = back.as_ref() {
        report("menu", back.set_attribute("data-action", "back"));
        dom::set_hidden(back, true);
    }

    {
        let (nav, back) = (nav.clone(), back.clone());
        dom::on_action(&root, move |action: Action| {
            if action.name != "go" {
                return;
            }
            let Some(section) = action.id.as_deref().and_then(|id| id.parse::<Section>().ok()) else {
                return;
            };
            let anchor = nav.borrow_mut().go(section);
            log::debug!("Navigating to #{}", anchor);
            if let Some(back) = back.as_ref() {
                dom::set_hidden(back, !nav.borrow().shows_back());
            }
            dom::after_ms(scroll_delay_ms, move || dom::scroll_to_id(anchor));
        });
    }

    if let Some(back) = back {
        let back_el = back.clone();
        dom::on_action(&back, move |_action: Action| {
            nav.borrow_mut().back_to_top();
            dom::scroll_to_top();
            dom::set_hidden(&back_el, !nav.borrow().shows_back());
        });
    }

    log::info!("Menu ready ({} items)", MENU_ITEMS.len());
}
