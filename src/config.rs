//! Page configuration
//!
//! Read once at startup from an optional `<script id="app-config"
//! type="application/json">` block. Every field has a default, so the block
//! may list only what it overrides.

use serde::{Deserialize, Serialize};

/// Asset locations and tunables for the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every fetched document and media file (e.g. `/Funderelele/`)
    pub base_path: String,

    // === Particles ===
    /// Number of drifting points in the background field
    pub particle_count: usize,

    // === Audio ===
    /// Looping background track, relative to `base_path`
    pub bgm_track: String,
    /// Short effect clips played on clicks, relative to `base_path`
    pub click_clips: Vec<String>,
    /// Click effect volume (0.0 - 1.0)
    pub click_volume: f64,

    // === Timing ===
    /// How long the "copied" confirmation stays visible
    pub copied_flash_ms: u32,
    /// Delay between choosing a menu item and scrolling to its section
    pub scroll_delay_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),

            particle_count: crate::consts::PARTICLE_COUNT,

            bgm_track: "audio/bgm.mp3".to_string(),
            click_clips: vec![
                "audio/pop1.mp3".to_string(),
                "audio/pop2.mp3".to_string(),
                "audio/pop3.mp3".to_string(),
            ],
            click_volume: 0.6,

            copied_flash_ms: 2000,
            scroll_delay_ms: 100,
        }
    }
}

impl AppConfig {
    /// Parse a (possibly partial) JSON document, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<AppConfig>(json) {
            Ok(mut config) => {
                config.normalize();
                config
            }
            Err(e) => {
                log::info!("Ignoring app config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Resolve a path against `base_path`
    pub fn url(&self, relative: &str) -> String {
        format!("{}{}", self.base_path, relative.trim_start_matches('/'))
    }

    pub fn data_url(&self, file: &str) -> String {
        self.url(&format!("data/{}", file))
    }

    pub fn bgm_url(&self) -> String {
        self.url(&self.bgm_track)
    }

    pub fn click_clip_urls(&self) -> Vec<String> {
        self.click_clips.iter().map(|c| self.url(c)).collect()
    }

    fn normalize(&mut self) {
        if !self.base_path.ends_with('/') {
            self.base_path.push('/');
        }
        self.click_volume = self.click_volume.clamp(0.0, 1.0);
    }

    /// Load from the `#app-config` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app-config"))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => {
                log::info!("Loaded app config");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default app config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = AppConfig::from_json(r#"{ "base_path": "/Funderelele/", "particle_count": 12 }"#);
        assert_eq!(config.base_path, "/Funderelele/");
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.copied_flash_ms, 2000);
        assert_eq!(config.click_clips.len(), 3);
    }

    #[test]
    fn malformed_document_uses_defaults() {
        assert_eq!(AppConfig::from_json("not json"), AppConfig::default());
    }

    #[test]
    fn urls_resolve_against_base_path() {
        let config = AppConfig::from_json(r#"{ "base_path": "/Funderelele" }"#);
        assert_eq!(config.data_url("songs.json"), "/Funderelele/data/songs.json");
        assert_eq!(config.bgm_url(), "/Funderelele/audio/bgm.mp3");
        assert_eq!(config.url("/audio/pop1.mp3"), "/Funderelele/audio/pop1.mp3");
    }

    #[test]
    fn default_particle_count_is_forty() {
        assert_eq!(AppConfig::default().particle_count, 40);
    }
}
