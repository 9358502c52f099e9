//! LocalStorage backend
//!
//! The storage object is looked up on every call: private browsing modes can
//! throw on access, and that must read as an error, not a panic.

use web_sys::Storage;

use super::js_reason;
use crate::error::{StoreError, StoreResult};
use crate::persistence::StorageBackend;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(key: &str) -> StoreResult<Storage> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable),
            Err(e) => Err(StoreError::Access {
                key: key.to_string(),
                reason: js_reason(&e),
            }),
        }
    }
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Self::storage(key)?
            .get_item(key)
            .map_err(|e| StoreError::Access {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        Self::storage(key)?
            .set_item(key, value)
            .map_err(|e| StoreError::Access {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }
}
