//! Radial navigation menu and section navigator
//!
//! Menu items sit on a ring around the page title. Positions are expressed in
//! percent of the (square) menu container so the layout scales with it.

use std::str::FromStr;

use glam::Vec2;

use crate::consts::{MENU_RING_RADIUS, MENU_VIEW_HALF};
use crate::error::UnknownName;
use crate::polar_to_cartesian;

/// Page sections reachable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Ziploc,
    Canciones,
    Quests,
    PostreDex,
}

impl Section {
    /// Element id of the section on the page
    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Ziploc => "ziploc",
            Section::Canciones => "canciones",
            Section::Quests => "quests",
            // PostreDex has no page of its own yet
            Section::PostreDex => "quests",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Ziploc => "ziploc",
            Section::Canciones => "canciones",
            Section::Quests => "quests",
            Section::PostreDex => "postredex",
        }
    }
}

impl FromStr for Section {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ziploc" => Ok(Section::Ziploc),
            "canciones" => Ok(Section::Canciones),
            "quests" => Ok(Section::Quests),
            "postredex" => Ok(Section::PostreDex),
            _ => Err(UnknownName {
                kind: "section",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuItem {
    pub label: &'static str,
    /// Degrees, clockwise from the positive x axis (screen coordinates)
    pub angle: f32,
    pub section: Section,
}

impl MenuItem {
    /// Center of the item in percent of the container
    pub fn position_percent(&self) -> Vec2 {
        let offset = polar_to_cartesian(MENU_RING_RADIUS / MENU_VIEW_HALF * 50.0, self.angle.to_radians());
        Vec2::splat(50.0) + offset
    }
}

pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem {
        label: "Ziploc",
        angle: 180.0,
        section: Section::Ziploc,
    },
    MenuItem {
        label: "Canciones",
        angle: 270.0,
        section: Section::Canciones,
    },
    MenuItem {
        label: "Side Quests",
        angle: 0.0,
        section: Section::Quests,
    },
    MenuItem {
        label: "PostreDex",
        angle: 90.0,
        section: Section::PostreDex,
    },
];

/// Tracks which section the visitor navigated to
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    active: Option<&'static str>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to a section; returns the anchor to scroll to
    pub fn go(&mut self, section: Section) -> &'static str {
        let anchor = section.anchor();
        self.active = Some(anchor);
        anchor
    }

    /// Back to the menu at the top of the page
    pub fn back_to_top(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    /// The "back" control is shown while a section is active
    pub fn shows_back(&self) -> bool {
        self.active.is_some()
    }
}
