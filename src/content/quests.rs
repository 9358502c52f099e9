//! Side quest tracker
//!
//! Checklist progress is stored per quest as a list of booleans under
//! `quest-progress`. The static `done` flags in the document are not used to
//! seed progress.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::PersistentCell;

/// Quest state as written in the document. Statuses other than the three
/// known ones are kept verbatim so the badge shows what the data says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestStatus {
    Locked,
    Active,
    Complete,
    Other(String),
}

impl QuestStatus {
    pub fn as_str(&self) -> &str {
        match self {
            QuestStatus::Locked => "locked",
            QuestStatus::Active => "active",
            QuestStatus::Complete => "complete",
            QuestStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for QuestStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "locked" => QuestStatus::Locked,
            "active" => QuestStatus::Active,
            "complete" => QuestStatus::Complete,
            _ => QuestStatus::Other(raw),
        }
    }
}

impl From<QuestStatus> for String {
    fn from(status: QuestStatus) -> Self {
        match status {
            QuestStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub status: QuestStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub checklist: Vec<CheckItem>,
    #[serde(default)]
    pub reward: String,
}

impl Quest {
    pub fn is_locked(&self) -> bool {
        self.status == QuestStatus::Locked
    }
}

/// Quest id -> checklist booleans
pub type QuestProgress = BTreeMap<String, Vec<bool>>;

pub struct QuestTracker {
    quests: Vec<Quest>,
    progress: PersistentCell<QuestProgress>,
    expanded: Option<String>,
}

impl QuestTracker {
    pub fn new(progress: PersistentCell<QuestProgress>) -> Self {
        Self {
            quests: Vec::new(),
            progress,
            expanded: None,
        }
    }

    pub fn set_quests(&mut self, quests: Vec<Quest>) {
        log::info!("Loaded {} quests", quests.len());
        self.quests = quests;
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn progress(&self) -> &PersistentCell<QuestProgress> {
        &self.progress
    }

    /// Quests that are not locked
    pub fn active_count(&self) -> usize {
        self.quests.iter().filter(|q| !q.is_locked()).count()
    }

    /// Flip one checklist entry. Returns false if the quest is locked.
    ///
    /// Quests without stored progress start from all-false; an index past the
    /// end extends the list with false.
    pub fn toggle_check(&self, quest_id: &str, index: usize) -> bool {
        let quest = self.quest(quest_id);
        if quest.is_some_and(Quest::is_locked) {
            log::debug!("Ignoring toggle on locked quest {}", quest_id);
            return false;
        }

        let seed_len = quest.map(|q| q.checklist.len()).unwrap_or(0);
        self.progress.update(|prev| {
            let mut next = prev.clone();
            let checks = next
                .entry(quest_id.to_string())
                .or_insert_with(|| vec![false; seed_len]);
            if index >= checks.len() {
                checks.resize(index + 1, false);
            }
            checks[index] = !checks[index];
            next
        });
        true
    }

    pub fn check_state(&self, quest_id: &str, index: usize) -> bool {
        self.progress
            .borrow()
            .get(quest_id)
            .and_then(|checks| checks.get(index).copied())
            .unwrap_or(false)
    }

    /// Checked items for a quest, counted against its checklist
    pub fn completed(&self, quest_id: &str) -> (usize, usize) {
        let total = self.quest(quest_id).map(|q| q.checklist.len()).unwrap_or(0);
        let done = (0..total).filter(|i| self.check_state(quest_id, *i)).count();
        (done, total)
    }

    /// Expand a quest card, or collapse it if it is already expanded
    pub fn toggle_expanded(&mut self, quest_id: &str) {
        if self.expanded.as_deref() == Some(quest_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(quest_id.to_string());
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::QUEST_PROGRESS_KEY;
    use crate::persistence::{DurableStore, Immediate};
    use std::rc::Rc;

    fn quest(id: &str, status: QuestStatus, items: usize) -> Quest {
        Quest {
            id: id.to_string(),
            title: format!("Quest {}", id),
            status,
            description: String::new(),
            checklist: (0..items)
                .map(|i| CheckItem {
                    id: format!("{}-{}", id, i),
                    label: format!("step {}", i),
                    done: false,
                })
                .collect(),
            reward: String::new(),
        }
    }

    fn tracker(store: &DurableStore) -> QuestTracker {
        let cell = PersistentCell::new(
            store.clone(),
            Rc::new(Immediate),
            QUEST_PROGRESS_KEY,
            QuestProgress::new(),
        );
        let mut tracker = QuestTracker::new(cell);
        tracker.set_quests(vec![
            quest("q1", QuestStatus::Active, 3),
            quest("q2", QuestStatus::Locked, 2),
            quest("q3", QuestStatus::Complete, 1),
        ]);
        tracker
    }

    #[test]
    fn toggling_twice_restores_checklist() {
        let store = DurableStore::in_memory();
        let tracker = tracker(&store);

        assert!(tracker.toggle_check("q1", 1));
        assert_eq!(tracker.progress().get()["q1"], vec![false, true, false]);

        assert!(tracker.toggle_check("q1", 1));
        assert_eq!(tracker.progress().get()["q1"], vec![false, false, false]);
    }

    #[test]
    fn progress_is_persisted() {
        let store = DurableStore::in_memory();
        tracker(&store).toggle_check("q1", 0);

        let reloaded = tracker(&store);
        assert!(reloaded.check_state("q1", 0));
        assert!(!reloaded.check_state("q1", 2));
    }

    #[test]
    fn locked_quest_ignores_toggles() {
        let store = DurableStore::in_memory();
        let tracker = tracker(&store);
        assert!(!tracker.toggle_check("q2", 0));
        assert!(!tracker.progress().get().contains_key("q2"));
    }

    #[test]
    fn index_past_end_extends_with_false() {
        let store = DurableStore::in_memory();
        let tracker = tracker(&store);
        tracker.toggle_check("q3", 2);
        assert_eq!(tracker.progress().get()["q3"], vec![false, false, true]);
    }

    #[test]
    fn unknown_quest_defaults_to_unchecked() {
        let store = DurableStore::in_memory();
        let tracker = tracker(&store);
        assert!(!tracker.check_state("nope", 0));
    }

    #[test]
    fn counts_active_and_completed() {
        let store = DurableStore::in_memory();
        let tracker = tracker(&store);
        assert_eq!(tracker.active_count(), 2);

        tracker.toggle_check("q1", 0);
        tracker.toggle_check("q1", 2);
        assert_eq!(tracker.completed("q1"), (2, 3));
    }

    #[test]
    fn one_quest_expanded_at_a_time() {
        let store = DurableStore::in_memory();
        let mut tracker = tracker(&store);
        tracker.toggle_expanded("q1");
        tracker.toggle_expanded("q3");
        assert_eq!(tracker.expanded(), Some("q3"));
        tracker.toggle_expanded("q3");
        assert_eq!(tracker.expanded(), None);
    }

    #[test]
    fn parses_quest_document() {
        let json = r#"[
            { "id": "q1", "title": "Picnic", "status": "active",
              "description": "Find a park",
              "checklist": [ { "id": "c1", "label": "Blanket", "done": true } ],
              "reward": "Sun" },
            { "id": "q2", "title": "Later", "status": "someday" }
        ]"#;
        let quests: Vec<Quest> = serde_json::from_str(json).unwrap();
        assert_eq!(quests[0].checklist.len(), 1);
        assert_eq!(quests[1].status, QuestStatus::Other("someday".into()));
        assert_eq!(quests[1].status.as_str(), "someday");
        assert!(!quests[1].is_locked());
        assert!(quests[1].checklist.is_empty());
    }

    #[test]
    fn unrecognized_status_is_written_back_verbatim() {
        let status: QuestStatus = serde_json::from_str(r#""en pausa""#).unwrap();
        assert_eq!(status.as_str(), "en pausa");
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""en pausa""#);

        let locked: QuestStatus = serde_json::from_str(r#""locked""#).unwrap();
        assert_eq!(locked, QuestStatus::Locked);
        assert_eq!(serde_json::to_string(&locked).unwrap(), r#""locked""#);
    }
}
