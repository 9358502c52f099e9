//! Memory card picker ("Ziploc")
//!
//! Shows one memory at a time, drawn at random from the tag-filtered pool.
//! The tag filter is a toggle set: no tags selected means every memory, and
//! a memory matches when it carries any selected tag.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::persistence::PersistentCell;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Memory {
    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Transient "copied" confirmation.
///
/// Each copy bumps the generation; a timer only clears the flag it started,
/// so a stale timer cannot hide a newer confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyFlash {
    visible: bool,
    generation: u64,
}

impl CopyFlash {
    /// Show the flag; returns the generation to pass to `expire`
    pub fn show(&mut self) -> u64 {
        self.generation += 1;
        self.visible = true;
        self.generation
    }

    /// Hide the flag if `generation` is still the latest. Returns true if hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.visible && generation == self.generation {
            self.visible = false;
            true
        } else {
            false
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

pub struct MemoryBrowser {
    memories: Vec<Memory>,
    current: Option<String>,
    active_tags: BTreeSet<String>,
    saved: PersistentCell<Vec<String>>,
    copied: CopyFlash,
}

impl MemoryBrowser {
    pub fn new(saved: PersistentCell<Vec<String>>) -> Self {
        Self {
            memories: Vec::new(),
            current: None,
            active_tags: BTreeSet::new(),
            saved,
            copied: CopyFlash::default(),
        }
    }

    /// Adopt the fetched memories and show a random one
    pub fn set_memories<R: Rng + ?Sized>(&mut self, memories: Vec<Memory>, rng: &mut R) {
        log::info!("Loaded {} memories", memories.len());
        self.memories = memories;
        self.current = super::pick(&self.memories, rng).map(|m| m.id.clone());
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    /// Every tag, in order of first appearance
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.memories
            .iter()
            .flat_map(|m| m.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn active_tags(&self) -> &BTreeSet<String> {
        &self.active_tags
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.active_tags.contains(tag)
    }

    /// No tag filter applied ("todas")
    pub fn showing_all(&self) -> bool {
        self.active_tags.is_empty()
    }

    /// Memories matching the tag filter
    pub fn filtered(&self) -> Vec<&Memory> {
        if self.active_tags.is_empty() {
            self.memories.iter().collect()
        } else {
            self.memories
                .iter()
                .filter(|m| m.has_any_tag(&self.active_tags))
                .collect()
        }
    }

    /// Add or remove a tag from the filter, then draw from the new pool
    pub fn toggle_tag<R: Rng + ?Sized>(&mut self, tag: &str, rng: &mut R) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
        self.shuffle(rng);
    }

    /// Drop the tag filter, then draw from everything
    pub fn clear_tags<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.active_tags.clear();
        self.shuffle(rng);
    }

    /// Draw a new current memory from the filtered pool (or everything)
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let pool = self.filtered();
        let next = super::pick_with_fallback(&pool, &self.memories, rng).map(|m| m.id.clone());
        if next.is_some() {
            self.current = next;
        }
    }

    /// Make a specific memory current. Returns false for an unknown id.
    pub fn select(&mut self, id: &str) -> bool {
        if self.memories.iter().any(|m| m.id == id) {
            self.current = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Memory> {
        let id = self.current.as_deref()?;
        self.memories.iter().find(|m| m.id == id)
    }

    pub fn saved(&self) -> &PersistentCell<Vec<String>> {
        &self.saved
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.borrow().iter().any(|s| s == id)
    }

    /// Save or unsave a memory. Returns whether it is now saved.
    pub fn toggle_save(&self, id: &str) -> bool {
        let now = self.saved.toggle_member(&id.to_string());
        log::debug!("Memory {} saved: {}", id, now);
        now
    }

    /// Save or unsave the current memory, if any
    pub fn toggle_save_current(&self) -> Option<bool> {
        let id = self.current.clone()?;
        Some(self.toggle_save(&id))
    }

    /// Start the copied confirmation for the current memory.
    /// Returns the text to copy and the flash generation.
    pub fn begin_copy(&mut self) -> Option<(String, u64)> {
        let text = self.current()?.text.clone();
        Some((text, self.copied.show()))
    }

    pub fn expire_copy(&mut self, generation: u64) -> bool {
        self.copied.expire(generation)
    }

    pub fn is_copied(&self) -> bool {
        self.copied.is_visible()
    }
}
