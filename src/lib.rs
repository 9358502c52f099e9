//! Memory Box - a single-page keepsake of quests, songs and memories
//!
//! Core modules:
//! - `persistence`: LocalStorage-backed reactive cells
//! - `sim`: Background particle field
//! - `content`: Quest tracker, song browser, memory picker
//! - `menu`: Radial navigation menu
//! - `section`: Ownership and event routing for one page section
//! - `audio`: Background music and click sounds
//! - `platform` / `renderer` / `ui`: Browser glue (WASM only)

pub mod audio;
pub mod config;
pub mod content;
pub mod error;
pub mod menu;
pub mod persistence;
pub mod section;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use config::AppConfig;
pub use error::{FetchError, StoreError, UnknownName};

use glam::Vec2;

/// Page constants
pub mod consts {
    /// LocalStorage keys, one per persisted concern
    pub const BGM_ENABLED_KEY: &str = "bgm-enabled";
    pub const FAVORITE_SONGS_KEY: &str = "favorite-songs";
    pub const SAVED_MEMORIES_KEY: &str = "saved-memories";
    pub const QUEST_PROGRESS_KEY: &str = "quest-progress";

    /// Static documents under `data/`
    pub const SONGS_FILE: &str = "songs.json";
    pub const QUESTS_FILE: &str = "quests.json";
    pub const MEMORIES_FILE: &str = "memories.json";

    /// Default particle population
    pub const PARTICLE_COUNT: usize = 40;
    /// Distance past the top edge before a particle is recycled
    pub const RECYCLE_MARGIN: f32 = 10.0;
    pub const PARTICLE_SIZE_MIN: f32 = 0.5;
    pub const PARTICLE_SIZE_MAX: f32 = 2.5;
    pub const PARTICLE_SPEED_MIN: f32 = 0.1;
    pub const PARTICLE_SPEED_MAX: f32 = 0.4;
    pub const PARTICLE_OPACITY_MIN: f32 = 0.1;
    pub const PARTICLE_OPACITY_MAX: f32 = 0.5;
    pub const PARTICLE_DRIFT_MAX: f32 = 0.25;

    /// Radial menu geometry (600x600 view box)
    pub const MENU_VIEW_HALF: f32 = 300.0;
    pub const MENU_RING_RADIUS: f32 = 260.0;

    /// Elements carrying this attribute (or inside one) make no click sound
    pub const NO_CLICK_SOUND_ATTR: &str = "data-no-click-sound";
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
