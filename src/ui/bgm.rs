//! Background music switch

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::report;
use crate::audio::BackgroundMusic;
use crate::consts::NO_CLICK_SOUND_ATTR;
use crate::platform::dom::{self, Action};

fn render(doc: &Document, root: &Element, enabled: bool) -> Result<(), JsValue> {
    dom::clear(root);
    root.append_child(&dom::text_element(doc, "span", "bgm-label", "BGM")?)?;

    let switch = dom::action_button(
        doc,
        if enabled { "switch on" } else { "switch" },
        "",
        "toggle-bgm",
        None,
    )?;
    switch.set_attribute("role", "switch")?;
    switch.set_attribute("aria-checked", if enabled { "true" } else { "false" })?;
    switch.set_attribute("aria-label", "Background music")?;
    // The music switch makes no click sound of its own
    switch.set_attribute(NO_CLICK_SOUND_ATTR, "")?;
    switch.append_child(&dom::element(doc, "span", "switch-thumb")?)?;
    root.append_child(&switch)?;
    Ok(())
}

pub fn mount(root: Element, music: Rc<BackgroundMusic>) {
    let Some(doc) = dom::document() else { return };
    report("bgm", render(&doc, &root, music.is_enabled()));

    {
        let (doc, root) = (doc.clone(), root.clone());
        music
            .enabled()
            .subscribe(move |enabled: &bool| report("bgm", render(&doc, &root, *enabled)));
    }

    dom::on_action(&root, move |action: Action| {
        if action.name == "toggle-bgm" {
            music.toggle();
        }
    });
}
