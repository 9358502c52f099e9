//! Shared owner for one page section
//!
//! A section's state is kept alive by the callbacks handed to its event
//! sources (the click router, the one-shot document load). Cell subscriptions
//! only hold weak handles, so a state and the cells inside it never keep each
//! other alive.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::persistence::PersistentCell;

struct Inner<S> {
    state: RefCell<S>,
    render: Box<dyn Fn(&S)>,
}

/// Strong handle to a section's state and its render function
pub struct SectionHandle<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for SectionHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Non-owning handle, for subscriptions and timers
pub struct WeakSection<S> {
    inner: Weak<Inner<S>>,
}

impl<S> Clone for WeakSection<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S> WeakSection<S> {
    pub fn upgrade(&self) -> Option<SectionHandle<S>> {
        self.inner.upgrade().map(|inner| SectionHandle { inner })
    }
}

impl<S: 'static> SectionHandle<S> {
    pub fn new(state: S, render: impl Fn(&S) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                render: Box::new(render),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakSection<S> {
        WeakSection {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn borrow(&self) -> Ref<'_, S> {
        self.inner.state.borrow()
    }

    pub fn render(&self) {
        (self.inner.render)(&self.inner.state.borrow());
    }

    /// Change in-memory state, then render.
    ///
    /// `f` must not touch a persistent cell: its subscribers render while the
    /// state is still mutably borrowed. Use [`SectionHandle::read`] for those.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let out = f(&mut self.inner.state.borrow_mut());
        self.render();
        out
    }

    /// Run `f` under a shared borrow. Persisted changes go through here and
    /// render via [`SectionHandle::rerender_on`].
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Render after every update of `cell`
    pub fn rerender_on<T>(&self, cell: &PersistentCell<T>)
    where
        T: Serialize + DeserializeOwned + Clone + 'static,
    {
        let weak = self.downgrade();
        cell.subscribe(move |_| {
            if let Some(section) = weak.upgrade() {
                section.render();
            }
        });
    }

    /// Callback for a fetched document. Owns the section until it runs.
    pub fn on_loaded<T: 'static>(&self, apply: impl FnOnce(&mut S, T) + 'static) -> Box<dyn FnOnce(T)> {
        let section = self.clone();
        Box::new(move |doc| section.update(|state| apply(state, doc)))
    }

    /// Event router. Owns the section for as long as the router lives.
    pub fn on_event<E: 'static>(
        &self,
        mut handler: impl FnMut(&SectionHandle<S>, E) + 'static,
    ) -> Box<dyn FnMut(E)> {
        let section = self.clone();
        Box::new(move |event| handler(&section, event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{QUEST_PROGRESS_KEY, SAVED_MEMORIES_KEY};
    use crate::content::{CheckItem, Memory, MemoryBrowser, Quest, QuestProgress, QuestStatus, QuestTracker};
    use crate::persistence::{DurableStore, Immediate, MemoryBackend};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::cell::Cell;

    enum Click {
        Save(&'static str),
        Select(&'static str),
    }

    fn memory(id: &str, tags: &[&str]) -> Memory {
        Memory {
            id: id.into(),
            text: format!("text {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn callbacks_keep_the_section_alive() {
        let backend = Rc::new(MemoryBackend::new());
        let store = DurableStore::new(backend.clone());
        let saved = PersistentCell::new(store, Rc::new(Immediate), SAVED_MEMORIES_KEY, Vec::new());

        let renders = Rc::new(Cell::new(0));
        let shown = Rc::new(RefCell::new(None::<String>));
        let section = {
            let (renders, shown) = (renders.clone(), shown.clone());
            SectionHandle::new(MemoryBrowser::new(saved.clone()), move |b: &MemoryBrowser| {
                renders.set(renders.get() + 1);
                *shown.borrow_mut() = b.current().map(|m| m.id.clone());
            })
        };
        section.rerender_on(&saved);

        let mut rng = Pcg32::seed_from_u64(1);
        let loaded = section.on_loaded(move |b: &mut MemoryBrowser, memories: Vec<Memory>| {
            b.set_memories(memories, &mut rng)
        });
        let mut route = section.on_event(|section, click: Click| match click {
            Click::Save(id) => {
                section.read(|b| b.toggle_save(id));
            }
            Click::Select(id) => {
                section.update(|b| b.select(id));
            }
        });
        let weak = section.downgrade();
        drop(section);

        loaded(vec![memory("m1", &["a"]), memory("m2", &["b"])]);
        let section = weak.upgrade().expect("router still owns the section");
        assert_eq!(section.borrow().memories().len(), 2);
        assert_eq!(renders.get(), 1);
        drop(section);

        route(Click::Select("m2"));
        assert_eq!(shown.borrow().as_deref(), Some("m2"));

        route(Click::Save("m2"));
        assert_eq!(renders.get(), 3);
        assert!(saved.contains(&"m2".to_string()));
        assert_eq!(backend.raw(SAVED_MEMORIES_KEY).as_deref(), Some(r#"["m2"]"#));

        // Only the router and the cell subscription remain; the latter is weak
        drop(route);
        assert!(weak.upgrade().is_none());
        saved.set(Vec::new());
        assert_eq!(renders.get(), 3);
    }

    #[test]
    fn quest_toggles_render_through_progress() {
        let progress = PersistentCell::new(
            DurableStore::in_memory(),
            Rc::new(Immediate),
            QUEST_PROGRESS_KEY,
            QuestProgress::new(),
        );
        let renders = Rc::new(Cell::new(0));
        let section = {
            let renders = renders.clone();
            SectionHandle::new(QuestTracker::new(progress.clone()), move |_: &QuestTracker| {
                renders.set(renders.get() + 1)
            })
        };
        section.rerender_on(&progress);

        let quest = Quest {
            id: "q1".into(),
            title: "Picnic".into(),
            status: QuestStatus::Active,
            description: String::new(),
            checklist: (0..3)
                .map(|i| CheckItem {
                    id: format!("c{}", i),
                    label: format!("item {}", i),
                    done: false,
                })
                .collect(),
            reward: String::new(),
        };
        let loaded = section.on_loaded(|t: &mut QuestTracker, quests: Vec<Quest>| t.set_quests(quests));
        let mut route = section.on_event(|section, (id, index): (&'static str, usize)| {
            section.read(|t| t.toggle_check(id, index));
        });
        drop(section);

        loaded(vec![quest]);
        route(("q1", 1));
        assert_eq!(renders.get(), 2);
        assert_eq!(progress.get().get("q1"), Some(&vec![false, true, false]));
    }
}
