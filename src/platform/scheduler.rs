//! Store writes deferred to the microtask queue

use crate::persistence::scheduler::{Scheduler, Task};

/// Runs each task in its own local future, after the current event handler
#[derive(Debug, Default, Clone, Copy)]
pub struct Microtask;

impl Scheduler for Microtask {
    fn defer(&self, task: Task) {
        wasm_bindgen_futures::spawn_local(async move { task() });
    }
}
