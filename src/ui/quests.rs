//! Side quests section

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::report;
use crate::content::{Quest, QuestStatus, QuestTracker};
use crate::platform::dom::{self, Action};
use crate::platform::fetch;
use crate::section::SectionHandle;

fn render(doc: &Document, root: &Element, tracker: &QuestTracker) -> Result<(), JsValue> {
    dom::clear(root);

    root.append_child(&dom::text_element(doc, "h2", "pixel-font section-title", "SIDE QUESTS")?)?;
    root.append_child(&dom::text_element(
        doc,
        "p",
        "section-subtitle",
        &format!("Inventory: {} active", tracker.active_count()),
    )?)?;

    let grid = dom::element(doc, "div", "quest-grid")?;
    for quest in tracker.quests() {
        grid.append_child(&quest_card(doc, tracker, quest)?)?;
    }
    root.append_child(&grid)?;
    Ok(())
}

fn quest_card(doc: &Document, tracker: &QuestTracker, quest: &Quest) -> Result<Element, JsValue> {
    let card = dom::element(doc, "div", "inventory-slot quest-card")?;
    card.set_attribute("data-action", "expand")?;
    card.set_attribute("data-id", &quest.id)?;

    let header = dom::element(doc, "div", "quest-header")?;
    header.append_child(&dom::text_element(doc, "h3", "pixel-font quest-title", &quest.title)?)?;
    let badge = match &quest.status {
        QuestStatus::Other(_) => "other",
        known => known.as_str(),
    };
    header.append_child(&dom::text_element(
        doc,
        "span",
        &format!("pixel-font badge badge-{}", badge),
        quest.status.as_str(),
    )?)?;
    card.append_child(&header)?;
    card.append_child(&dom::text_element(doc, "p", "quest-description", &quest.description)?)?;

    let (done, total) = tracker.completed(&quest.id);
    if total > 0 {
        card.append_child(&dom::text_element(doc, "p", "quest-progress", &format!("{}/{}", done, total))?)?;
    }

    if tracker.expanded() != Some(quest.id.as_str()) {
        return Ok(card);
    }

    let checklist = dom::element(doc, "div", "quest-checklist")?;
    for (i, item) in quest.checklist.iter().enumerate() {
        let checked = tracker.check_state(&quest.id, i);

        // Clicks inside the row must not collapse the card
        let row = dom::element(doc, "label", "check-row")?;
        row.set_attribute("data-action", "none")?;

        let mut box_class = String::from("check-box");
        if checked {
            box_class.push_str(" checked");
        }
        if quest.is_locked() {
            box_class.push_str(" locked");
        }
        let check = dom::action_button(doc, &box_class, if checked { "✓" } else { "" }, "check", Some(&quest.id))?;
        check.set_attribute("data-index", &i.to_string())?;
        check.set_attribute("aria-pressed", if checked { "true" } else { "false" })?;
        row.append_child(&check)?;

        let label_class = if checked { "check-label done" } else { "check-label" };
        row.append_child(&dom::text_element(doc, "span", label_class, &item.label)?)?;
        checklist.append_child(&row)?;
    }
    checklist.append_child(&dom::text_element(doc, "p", "quest-reward", &format!("✧ {}", quest.reward))?)?;
    card.append_child(&checklist)?;

    Ok(card)
}

/// Render `tracker` into `root` and fetch the quest list from `url`
pub fn mount(root: Element, tracker: QuestTracker, url: String) {
    let Some(doc) = dom::document() else { return };
    let section = {
        let root = root.clone();
        SectionHandle::new(tracker, move |tracker: &QuestTracker| {
            report("quests", render(&doc, &root, tracker))
        })
    };
    section.render();

    // Progress changes re-render synchronously
    let progress = section.borrow().progress().clone();
    section.rerender_on(&progress);

    dom::on_action(
        &root,
        section.on_event(|section, action: Action| {
            let Some(id) = action.id.as_deref() else { return };
            match action.name.as_str() {
                "expand" => section.update(|t| t.toggle_expanded(id)),
                "check" => {
                    if let Some(index) = action.index {
                        section.read(|t| t.toggle_check(id, index));
                    }
                }
                _ => {}
            }
        }),
    );

    fetch::load(
        url,
        section.on_loaded(|tracker: &mut QuestTracker, quests: Vec<Quest>| tracker.set_quests(quests)),
    );
}
