//! Ziploc section: one memory card, actions, tag filter and the memory grid

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::report;
use crate::content::{Memory, MemoryBrowser};
use crate::platform::dom::{self, Action};
use crate::platform::fetch;
use crate::section::SectionHandle;

fn render(doc: &Document, root: &Element, browser: &MemoryBrowser) -> Result<(), JsValue> {
    dom::clear(root);
    root.append_child(&dom::text_element(doc, "h2", "pixel-font section-title", "ZIPLOC DE SONRISAS")?)?;
    root.append_child(&dom::text_element(doc, "p", "section-subtitle", "Open the bag. Pick a memory.")?)?;

    if let Some(current) = browser.current() {
        let card = dom::element(doc, "div", "inventory-slot memory-card")?;
        card.append_child(&dom::text_element(doc, "p", "memory-text", &format!("\"{}\"", current.text))?)?;
        card.append_child(&tag_list(doc, current)?)?;
        root.append_child(&card)?;
    }

    // Actions
    let actions = dom::element(doc, "div", "memory-actions")?;
    actions.append_child(&dom::action_button(doc, "pill", "↻ shuffle", "shuffle", None)?)?;
    let saved = browser.current().is_some_and(|m| browser.is_saved(&m.id));
    actions.append_child(&dom::action_button(
        doc,
        if saved { "pill saved" } else { "pill" },
        if saved { "♡ saved" } else { "♡ save" },
        "save-current",
        None,
    )?)?;
    actions.append_child(&dom::action_button(
        doc,
        "pill",
        if browser.is_copied() { "✓ copied" } else { "⎘ copy" },
        "copy",
        None,
    )?)?;
    root.append_child(&actions)?;

    // Tag filter
    let tags = dom::element(doc, "div", "tag-filter")?;
    let all = dom::action_button(
        doc,
        if browser.showing_all() { "tag active" } else { "tag" },
        "todas",
        "all-tags",
        None,
    )?;
    all.set_attribute("aria-pressed", if browser.showing_all() { "true" } else { "false" })?;
    tags.append_child(&all)?;
    for tag in browser.all_tags() {
        let active = browser.is_tag_active(tag);
        let button = dom::action_button(doc, if active { "tag active" } else { "tag" }, tag, "tag", Some(tag))?;
        button.set_attribute("aria-pressed", if active { "true" } else { "false" })?;
        tags.append_child(&button)?;
    }
    root.append_child(&tags)?;

    // Grid of the filtered pool
    let grid = dom::element(doc, "div", "memory-grid")?;
    let current_id = browser.current().map(|m| m.id.as_str());
    for memory in browser.filtered() {
        grid.append_child(&memory_tile(doc, browser, memory, current_id == Some(memory.id.as_str()))?)?;
    }
    root.append_child(&grid)?;
    Ok(())
}

fn tag_list(doc: &Document, memory: &Memory) -> Result<Element, JsValue> {
    let list = dom::element(doc, "div", "memory-tags")?;
    for tag in &memory.tags {
        list.append_child(&dom::text_element(doc, "span", "memory-tag", &format!("#{}", tag))?)?;
    }
    Ok(list)
}

fn memory_tile(doc: &Document, browser: &MemoryBrowser, memory: &Memory, is_current: bool) -> Result<Element, JsValue> {
    let tile = dom::element(
        doc,
        "div",
        if is_current { "inventory-slot memory-tile current" } else { "inventory-slot memory-tile" },
    )?;
    tile.set_attribute("data-action", "select")?;
    tile.set_attribute("data-id", &memory.id)?;

    let body = dom::element(doc, "div", "memory-tile-body")?;
    let text = dom::text_element(doc, "p", "memory-tile-text", &format!("“{}”", memory.text))?;
    text.set_attribute("title", &memory.text)?;
    body.append_child(&text)?;
    body.append_child(&tag_list(doc, memory)?)?;
    tile.append_child(&body)?;

    let saved = browser.is_saved(&memory.id);
    let star = dom::action_button(
        doc,
        if saved { "favorite on" } else { "favorite" },
        if saved { "★" } else { "☆" },
        "save",
        Some(&memory.id),
    )?;
    star.set_attribute("aria-pressed", if saved { "true" } else { "false" })?;
    star.set_attribute(
        "aria-label",
        if saved { "Quitar de favoritos" } else { "Agregar a favoritos" },
    )?;
    tile.append_child(&star)?;

    Ok(tile)
}

/// Render `browser` into `root` and fetch the memories from `url`
pub fn mount(root: Element, browser: MemoryBrowser, url: String, seed: u64, copied_flash_ms: u32) {
    let Some(doc) = dom::document() else { return };
    let rng = Rc::new(RefCell::new(Pcg32::seed_from_u64(seed)));
    let section = {
        let root = root.clone();
        SectionHandle::new(browser, move |browser: &MemoryBrowser| {
            report("memories", render(&doc, &root, browser))
        })
    };
    section.render();

    let saved = section.borrow().saved().clone();
    section.rerender_on(&saved);

    {
        let rng = rng.clone();
        dom::on_action(
            &root,
            section.on_event(move |section, action: Action| {
                let mut rng = rng.borrow_mut();
                match (action.name.as_str(), action.id.as_deref()) {
                    // Saved-list changes render through the subscription
                    ("save", Some(id)) => {
                        section.read(|b| b.toggle_save(id));
                    }
                    ("save-current", _) => {
                        section.read(|b| b.toggle_save_current());
                    }
                    ("shuffle", _) => section.update(|b| b.shuffle(&mut *rng)),
                    ("select", Some(id)) => {
                        section.update(|b| b.select(id));
                    }
                    ("tag", Some(tag)) => section.update(|b| b.toggle_tag(tag, &mut *rng)),
                    ("all-tags", _) => section.update(|b| b.clear_tags(&mut *rng)),
                    ("copy", _) => {
                        if let Some((text, generation)) = section.update(|b| b.begin_copy()) {
                            dom::copy_text(&text);
                            let weak = section.downgrade();
                            dom::after_ms(copied_flash_ms, move || {
                                if let Some(section) = weak.upgrade() {
                                    section.update(|b| b.expire_copy(generation));
                                }
                            });
                        }
                    }
                    _ => {}
                }
            }),
        );
    }

    fetch::load(
        url,
        section.on_loaded(move |browser: &mut MemoryBrowser, memories: Vec<Memory>| {
            browser.set_memories(memories, &mut *rng.borrow_mut())
        }),
    );
}
