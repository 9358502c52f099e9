//! Reactive persistent cell
//!
//! An in-memory value bound to one store key. The value is seeded from the
//! store on creation; every update notifies subscribers synchronously and
//! then hands the write to the scheduler. A failed write never rolls back the
//! in-memory value.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::scheduler::Scheduler;
use super::store::DurableStore;

/// Handle returned by [`PersistentCell::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    key: String,
    value: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: Cell<u64>,
    store: DurableStore,
    scheduler: Rc<dyn Scheduler>,
}

/// Shared handle; clones observe and update the same value
pub struct PersistentCell<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for PersistentCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PersistentCell<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Bind a cell to `key`, seeding it from the store (or `default`)
    pub fn new(
        store: DurableStore,
        scheduler: Rc<dyn Scheduler>,
        key: impl Into<String>,
        default: T,
    ) -> Self {
        let key = key.into();
        let value = store.read(&key, default);
        Self {
            inner: Rc::new(Inner {
                key,
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                store,
                scheduler,
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning
    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    /// Replace the value
    pub fn set(&self, next: T) {
        self.update(move |_| next);
    }

    /// Compute the next value from the previous one
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = {
            let prev = self.inner.value.borrow();
            f(&prev)
        };
        *self.inner.value.borrow_mut() = next.clone();

        self.notify(&next);
        self.persist(next);
    }

    /// Register a callback run after every update
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .subscribers
            .borrow_mut()
            .retain(|(sub, _)| *sub != id);
    }

    fn notify(&self, value: &T) {
        // Copy the list out so a subscriber may (un)subscribe while running
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        for f in subscribers {
            f(value);
        }
    }

    fn persist(&self, value: T) {
        let store = self.inner.store.clone();
        let key = self.inner.key.clone();
        self.inner.scheduler.defer(Box::new(move || {
            store.write(&key, &value);
        }));
    }
}

impl<K> PersistentCell<Vec<K>>
where
    K: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
{
    pub fn contains(&self, id: &K) -> bool {
        self.inner.value.borrow().contains(id)
    }

    /// Insert `id` if absent, remove it if present. Returns the new membership.
    pub fn toggle_member(&self, id: &K) -> bool {
        let mut now_member = false;
        self.update(|prev| {
            let next = toggle_membership(prev, id);
            now_member = next.contains(id);
            next
        });
        now_member
    }
}

/// Set-like toggle over a list, preserving the order of the other members
pub fn toggle_membership<K: PartialEq + Clone>(list: &[K], id: &K) -> Vec<K> {
    if list.contains(id) {
        list.iter().filter(|k| *k != id).cloned().collect()
    } else {
        let mut next = list.to_vec();
        next.push(id.clone());
        next
    }
}
