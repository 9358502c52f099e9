//! Durable key/value store adapter
//!
//! Wraps a synchronous string store (LocalStorage on web) with JSON
//! encode/decode. The contained `read`/`write` never fail: a missing,
//! corrupt or unreachable entry reads as the caller's default, and a failed
//! write is logged and dropped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};

/// Raw string storage
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Shared handle to the profile-wide store
#[derive(Clone)]
pub struct DurableStore {
    backend: Rc<dyn StorageBackend>,
}

impl DurableStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh in-memory map
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryBackend::new()))
    }

    /// Read and decode an entry. `Ok(None)` means the key is absent.
    pub fn try_read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(json) = self.backend.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Encode and write an entry
    pub fn try_write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set_item(key, &json)
    }

    /// Read an entry, falling back to `default` on absence or any error
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_read(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Using default for `{}`: {}", key, e);
                default
            }
        }
    }

    /// Write an entry, swallowing failures. Returns whether it was persisted.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_write(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Dropped write to `{}`: {}", key, e);
                false
            }
        }
    }
}

/// In-memory backend used natively and in tests.
///
/// Failure switches simulate private-browsing restrictions and quota errors.
#[derive(Default)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
    fail_reads: RefCell<bool>,
    fail_writes: RefCell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw (possibly non-JSON) payload under `key`
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.borrow_mut() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        if *self.fail_reads.borrow() {
            return Err(StoreError::Access {
                key: key.to_string(),
                reason: "reads disabled".into(),
            });
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        if *self.fail_writes.borrow() {
            return Err(StoreError::Access {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            });
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
