//! Mood-grouped song browser with persisted favorites

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;
use crate::persistence::PersistentCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub link: String,
    #[serde(default)]
    pub note: String,
}

/// `songs.json` as fetched: mood name -> songs
pub type SongCatalog = BTreeMap<String, Vec<Song>>;

/// Song mood tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Mood {
    #[default]
    Cursis,
    Euforia,
    Calmadas,
    Magicas,
    Oniricas,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Cursis,
        Mood::Euforia,
        Mood::Calmadas,
        Mood::Magicas,
        Mood::Oniricas,
    ];

    /// Key used in `songs.json` and shown as the tab label
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Cursis => "cursis",
            Mood::Euforia => "euforia",
            Mood::Calmadas => "calmadas",
            Mood::Magicas => "mágicas",
            Mood::Oniricas => "oníricas",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Cursis => "♡",
            Mood::Euforia => "☀️",
            Mood::Calmadas => "🌊",
            Mood::Magicas => "✧",
            Mood::Oniricas => "🌙",
        }
    }
}

impl FromStr for Mood {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cursis" => Ok(Mood::Cursis),
            "euforia" => Ok(Mood::Euforia),
            "calmadas" => Ok(Mood::Calmadas),
            "mágicas" | "magicas" => Ok(Mood::Magicas),
            "oníricas" | "oniricas" => Ok(Mood::Oniricas),
            _ => Err(UnknownName {
                kind: "mood",
                name: s.to_string(),
            }),
        }
    }
}

pub struct SongBrowser {
    songs: BTreeMap<Mood, Vec<Song>>,
    active: Mood,
    favorites: PersistentCell<Vec<String>>,
}

impl SongBrowser {
    pub fn new(favorites: PersistentCell<Vec<String>>) -> Self {
        Self {
            songs: BTreeMap::new(),
            active: Mood::default(),
            favorites,
        }
    }

    /// Adopt a fetched catalog; unknown moods are dropped
    pub fn set_catalog(&mut self, catalog: SongCatalog) {
        self.songs.clear();
        for (name, songs) in catalog {
            match name.parse::<Mood>() {
                Ok(mood) => {
                    self.songs.insert(mood, songs);
                }
                Err(e) => log::warn!("Skipping {}", e),
            }
        }
        log::info!("Loaded {} songs", self.len());
    }

    pub fn len(&self) -> usize {
        self.songs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active_mood(&self) -> Mood {
        self.active
    }

    pub fn select_mood(&mut self, mood: Mood) {
        self.active = mood;
    }

    /// Songs under the active mood tab
    pub fn current_songs(&self) -> &[Song] {
        self.songs
            .get(&self.active)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all_songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.values().flatten()
    }

    pub fn favorites(&self) -> &PersistentCell<Vec<String>> {
        &self.favorites
    }

    pub fn is_favorite(&self, title: &str) -> bool {
        self.favorites.borrow().iter().any(|t| t == title)
    }

    /// Returns whether the song is now a favorite
    pub fn toggle_favorite(&self, title: &str) -> bool {
        let now = self.favorites.toggle_member(&title.to_string());
        log::debug!("Favorite `{}`: {}", title, now);
        now
    }

    /// Any song from any mood
    pub fn random_song<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Song> {
        let all: Vec<&Song> = self.all_songs().collect();
        super::pick(&all, rng).copied()
    }
}
