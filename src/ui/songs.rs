//! Canciones section

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::report;
use crate::content::{Mood, Song, SongBrowser, SongCatalog};
use crate::platform::dom::{self, Action};
use crate::platform::fetch;
use crate::section::SectionHandle;

fn render(doc: &Document, root: &Element, browser: &SongBrowser) -> Result<(), JsValue> {
    dom::clear(root);
    root.append_child(&dom::text_element(doc, "h2", "pixel-font section-title", "CANCIONES")?)?;

    let tabs = dom::element(doc, "div", "mood-tabs")?;
    for mood in Mood::ALL {
        let class = if mood == browser.active_mood() {
            "mood-tab active"
        } else {
            "mood-tab"
        };
        let label = format!("{} {}", mood.glyph(), mood.as_str());
        tabs.append_child(&dom::action_button(doc, class, &label, "mood", Some(mood.as_str()))?)?;
    }
    root.append_child(&tabs)?;

    let random = dom::element(doc, "div", "random-row")?;
    random.append_child(&dom::action_button(doc, "pill", "✦ random song", "random", None)?)?;
    root.append_child(&random)?;

    let list = dom::element(doc, "div", "song-list")?;
    for song in browser.current_songs() {
        list.append_child(&song_row(doc, browser, song)?)?;
    }
    root.append_child(&list)?;
    Ok(())
}

fn song_row(doc: &Document, browser: &SongBrowser, song: &Song) -> Result<Element, JsValue> {
    let row = dom::element(doc, "div", "inventory-slot song-row")?;

    let info = dom::element(doc, "div", "song-info")?;
    let link = dom::text_element(doc, "a", "song-title", &song.title)?;
    link.set_attribute("href", &song.link)?;
    link.set_attribute("target", "_blank")?;
    link.set_attribute("rel", "noopener noreferrer")?;
    info.append_child(&link)?;
    info.append_child(&dom::text_element(doc, "p", "song-artist", &song.artist)?)?;
    info.append_child(&dom::text_element(doc, "p", "song-note", &song.note)?)?;
    row.append_child(&info)?;

    let favorite = browser.is_favorite(&song.title);
    let (class, star) = if favorite {
        ("favorite on", "★")
    } else {
        ("favorite", "☆")
    };
    let button = dom::action_button(doc, class, star, "favorite", Some(&song.title))?;
    button.set_attribute("aria-pressed", if favorite { "true" } else { "false" })?;
    row.append_child(&button)?;

    Ok(row)
}

/// Render `browser` into `root` and fetch the catalog from `url`
pub fn mount(root: Element, browser: SongBrowser, url: String, seed: u64) {
    let Some(doc) = dom::document() else { return };
    let section = {
        let root = root.clone();
        SectionHandle::new(browser, move |browser: &SongBrowser| {
            report("songs", render(&doc, &root, browser))
        })
    };
    section.render();

    let favorites = section.borrow().favorites().clone();
    section.rerender_on(&favorites);

    let mut rng = Pcg32::seed_from_u64(seed);
    dom::on_action(
        &root,
        section.on_event(move |section, action: Action| {
            match (action.name.as_str(), action.id.as_deref()) {
                ("mood", Some(name)) => match name.parse::<Mood>() {
                    Ok(mood) => section.update(|b| b.select_mood(mood)),
                    Err(e) => log::debug!("Ignoring tab: {}", e),
                },
                ("favorite", Some(title)) => {
                    section.read(|b| b.toggle_favorite(title));
                }
                ("random", _) => {
                    let link = section.read(|b| b.random_song(&mut rng).map(|s| s.link.clone()));
                    if let Some(link) = link {
                        dom::open_in_new_tab(&link);
                    }
                }
                _ => {}
            }
        }),
    );

    fetch::load(
        url,
        section.on_loaded(|browser: &mut SongBrowser, catalog: SongCatalog| browser.set_catalog(catalog)),
    );
}
