//! Memory Box entry point
//!
//! Handles platform-specific initialization and mounts the page sections.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use memory_box::audio::{BackgroundMusic, ClipSet, install_click_sounds};
    use memory_box::consts::*;
    use memory_box::content::{MemoryBrowser, QuestProgress, QuestTracker, SongBrowser};
    use memory_box::persistence::{DurableStore, PersistentCell, Scheduler};
    use memory_box::platform::{LocalStorage, Microtask};
    use memory_box::renderer::ParticleLoop;
    use memory_box::{AppConfig, ui};

    thread_local! {
        // Dropped on pagehide so the frame loop and resize listener detach
        static PARTICLES: RefCell<Option<ParticleLoop>> = const { RefCell::new(None) };
    }

    fn mount_particles(doc: &Document, count: usize, seed: u64) {
        let Some(canvas) = doc
            .get_element_by_id("particles")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No #particles canvas");
            return;
        };

        let particles = ParticleLoop::mount(canvas, count, seed);
        log::info!("Particles: {:?}", particles.phase());
        PARTICLES.with(|p| *p.borrow_mut() = Some(particles));

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            PARTICLES.with(|p| p.borrow_mut().take());
        });
        if let Some(window) = web_sys::window() {
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Memory Box starting...");

        let config = AppConfig::load();
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        let store = DurableStore::new(Rc::new(LocalStorage));
        let scheduler: Rc<dyn Scheduler> = Rc::new(Microtask);

        mount_particles(&doc, config.particle_count, seed);

        // Audio
        let music = Rc::new(BackgroundMusic::new(
            config.bgm_url(),
            PersistentCell::new(store.clone(), scheduler.clone(), BGM_ENABLED_KEY, false),
        ));
        if let Some(root) = doc.get_element_by_id("bgm-toggle") {
            ui::bgm::mount(root, music);
        }
        install_click_sounds(
            ClipSet::new(config.click_clip_urls()),
            config.click_volume,
            seed.wrapping_add(1),
        );

        // Navigation
        if let Some(root) = doc.get_element_by_id("menu") {
            ui::menu::mount(root, doc.get_element_by_id("back-to-menu"), config.scroll_delay_ms);
        }

        // Sections
        if let Some(root) = doc.get_element_by_id("quests") {
            let progress = PersistentCell::new(
                store.clone(),
                scheduler.clone(),
                QUEST_PROGRESS_KEY,
                QuestProgress::new(),
            );
            ui::quests::mount(root, QuestTracker::new(progress), config.data_url(QUESTS_FILE));
        }

        if let Some(root) = doc.get_element_by_id("canciones") {
            let favorites =
                PersistentCell::new(store.clone(), scheduler.clone(), FAVORITE_SONGS_KEY, Vec::new());
            ui::songs::mount(
                root,
                SongBrowser::new(favorites),
                config.data_url(SONGS_FILE),
                seed.wrapping_add(2),
            );
        }

        if let Some(root) = doc.get_element_by_id("ziploc") {
            let saved = PersistentCell::new(store, scheduler, SAVED_MEMORIES_KEY, Vec::new());
            ui::memories::mount(
                root,
                MemoryBrowser::new(saved),
                config.data_url(MEMORIES_FILE),
                seed.wrapping_add(3),
                config.copied_flash_ms,
            );
        }

        log::info!("Memory Box running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Memory Box (native) starting...");
    log::info!("The page runs in the browser - use `trunk serve` for the web version");

    println!("\nRunning particle field headless...");
    headless_particles();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_particles() {
    use memory_box::consts::PARTICLE_COUNT;
    use memory_box::sim::{ParticleSimulator, ParticleSurface};

    #[derive(Default)]
    struct Tally {
        frames: usize,
        circles: usize,
    }

    impl ParticleSurface for Tally {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.frames += 1;
        }

        fn fill_circle(&mut self, _x: f32, _y: f32, _radius: f32, _opacity: f32) {
            self.circles += 1;
        }
    }

    let config = memory_box::AppConfig::default();
    let mut sim = ParticleSimulator::new(config.particle_count);
    sim.start(false, 800.0, 600.0, 42);

    let mut tally = Tally::default();
    for _ in 0..600 {
        sim.frame(&mut tally);
    }
    sim.stop();

    assert_eq!(tally.circles, tally.frames * PARTICLE_COUNT);
    println!(
        "✓ {} frames, {} particles drawn per frame, phase {:?}",
        tally.frames,
        tally.circles / tally.frames.max(1),
        sim.phase()
    );
}
