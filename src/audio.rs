//! Audio feedback using HTML media elements
//!
//! Two independent producers, both best-effort:
//! - a looping background track switched by the persisted music toggle
//! - a random short clip on every click outside opted-out controls
//!
//! Playback failures (autoplay blocks, decode errors) are logged and never
//! surfaced; the toggle state updates regardless.

use rand::Rng;

/// Fixed set of click clips
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipSet {
    urls: Vec<String>,
}

impl ClipSet {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Uniform pick of one clip
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        crate::content::pick(&self.urls, rng).map(String::as_str)
    }
}

/// What the background track does after the toggle changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    /// Unmute and start playing
    Play,
    /// Pause and rewind to the start
    Stop,
}

impl MusicAction {
    pub fn for_enabled(enabled: bool) -> Self {
        if enabled { MusicAction::Play } else { MusicAction::Stop }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{BackgroundMusic, install_click_sounds};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Element, HtmlAudioElement, MouseEvent};

    use super::{ClipSet, MusicAction};
    use crate::consts::NO_CLICK_SOUND_ATTR;
    use crate::persistence::PersistentCell;

    /// Looping background track. The media element is created on first use
    /// and reused for every later toggle.
    pub struct BackgroundMusic {
        url: String,
        audio: RefCell<Option<HtmlAudioElement>>,
        enabled: PersistentCell<bool>,
    }

    impl BackgroundMusic {
        pub fn new(url: String, enabled: PersistentCell<bool>) -> Self {
            Self {
                url,
                audio: RefCell::new(None),
                enabled,
            }
        }

        pub fn enabled(&self) -> &PersistentCell<bool> {
            &self.enabled
        }

        pub fn is_enabled(&self) -> bool {
            self.enabled.get()
        }

        pub fn toggle(&self) {
            self.set_enabled(!self.is_enabled());
        }

        pub fn set_enabled(&self, next: bool) {
            if let Some(audio) = self.ensure_audio() {
                match MusicAction::for_enabled(next) {
                    MusicAction::Play => {
                        audio.set_muted(false);
                        play_logged(&audio, "BGM");
                    }
                    MusicAction::Stop => {
                        let _ = audio.pause();
                        audio.set_current_time(0.0);
                    }
                }
            }
            log::info!("BGM {}", if next { "on" } else { "off" });
            self.enabled.set(next);
        }

        fn ensure_audio(&self) -> Option<HtmlAudioElement> {
            if let Some(audio) = self.audio.borrow().as_ref() {
                return Some(audio.clone());
            }

            let audio = match HtmlAudioElement::new_with_src(&self.url) {
                Ok(audio) => audio,
                Err(e) => {
                    log::warn!("Failed to create BGM element: {:?}", e);
                    return None;
                }
            };
            audio.set_loop(true);
            audio.set_preload("auto");
            audio.set_volume(1.0);

            let audio_err = audio.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::error!("BGM load/play error: {:?}", audio_err.error().map(|e| e.code()));
            });
            let _ = audio.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
            closure.forget();

            *self.audio.borrow_mut() = Some(audio.clone());
            Some(audio)
        }
    }

    /// Start playback, logging a rejected play promise
    fn play_logged(audio: &HtmlAudioElement, what: &'static str) {
        match audio.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("{} play blocked: {:?}", what, e);
                    }
                });
            }
            Err(e) => log::warn!("{} play failed: {:?}", what, e),
        }
    }

    /// Whether the click came from an opted-out control
    fn opted_out(event: &MouseEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!("[{}]", NO_CLICK_SOUND_ATTR)).ok().flatten())
            .is_some()
    }

    /// Listen for clicks anywhere on the page and play a random clip for each.
    /// Every click gets its own element, so rapid clicks overlap.
    pub fn install_click_sounds(clips: ClipSet, volume: f64, seed: u64) {
        if clips.is_empty() {
            log::info!("No click clips configured");
            return;
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let rng = Rc::new(RefCell::new(Pcg32::seed_from_u64(seed)));
        let clip_count = clips.len();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if opted_out(&event) {
                return;
            }
            let Some(url) = clips.pick(&mut *rng.borrow_mut()).map(str::to_string) else {
                return;
            };
            match HtmlAudioElement::new_with_src(&url) {
                Ok(audio) => {
                    audio.set_volume(volume);
                    if let Ok(promise) = audio.play() {
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Err(e) = JsFuture::from(promise).await {
                                log::debug!("Click sound skipped: {:?}", e);
                            }
                        });
                    }
                }
                Err(e) => log::debug!("Click sound unavailable: {:?}", e),
            }
        });
        let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();

        log::info!("Click sounds ready ({} clips)", clip_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn picks_every_clip_eventually() {
        let clips = ClipSet::new(vec!["a.mp3".into(), "b.mp3".into(), "c.mp3".into()]);
        let mut rng = Pcg32::seed_from_u64(12);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(clips.pick(&mut rng).unwrap().to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn empty_clip_set_picks_nothing() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(ClipSet::default().pick(&mut rng), None);
    }

    #[test]
    fn toggle_maps_to_action() {
        assert_eq!(MusicAction::for_enabled(true), MusicAction::Play);
        assert_eq!(MusicAction::for_enabled(false), MusicAction::Stop);
    }
}
