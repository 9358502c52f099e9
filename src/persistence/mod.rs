//! Browser-local persistence
//!
//! - `store`: JSON key/value adapter with failure containment
//! - `cell`: reactive values mirrored to one store key each
//! - `scheduler`: deferral of store writes

pub mod cell;
pub mod scheduler;
pub mod store;

pub use cell::{PersistentCell, SubscriptionId, toggle_membership};
pub use scheduler::{Immediate, ManualQueue, Scheduler};
pub use store::{DurableStore, MemoryBackend, StorageBackend};
