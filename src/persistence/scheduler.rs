//! Deferred work for persistence writes
//!
//! Cells hand their writes to a scheduler so the caller gets control back
//! before the store is touched.

use std::cell::RefCell;
use std::collections::VecDeque;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    fn defer(&self, task: Task);
}

/// Runs tasks inline (native builds)
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn defer(&self, task: Task) {
        task();
    }
}

/// Holds tasks until `run_pending` is called
#[derive(Default)]
pub struct ManualQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl ManualQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Drain the queue in FIFO order, returning how many tasks ran
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        // Pop one at a time so a task may defer more work
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            let Some(task) = next else { break };
            task();
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ManualQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}
