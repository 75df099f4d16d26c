#![forbid(unsafe_code)]

//! UI-thread trampoline scheduler.
//!
//! A [`UiScheduler`] runs tasks on the thread that created it. Scheduling
//! from outside a running task executes the task immediately, in the same
//! run-loop turn. Scheduling from inside a running task (re-entrancy) appends
//! to a FIFO queue that is drained before the outermost `schedule` call
//! returns.
//!
//! # Invariants
//!
//! 1. Tasks run in the order they were scheduled.
//! 2. No task starts while another task from the same scheduler is running.
//! 3. Every task scheduled before the outermost `schedule` returns has run
//!    by then (unless a task panicked; the rest run on the next drain).
//!
//! Each reactive port owns its own scheduler so that a port's delivery
//! timing never depends on work queued by unrelated ports.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::thread::{self, ThreadId};

type Task = Box<dyn FnOnce()>;

/// FIFO trampoline bound to the thread that created it.
pub struct UiScheduler {
    owner: ThreadId,
    queue: RefCell<VecDeque<Task>>,
    draining: Cell<bool>,
}

impl fmt::Debug for UiScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiScheduler")
            .field("owner", &self.owner)
            .field("pending", &self.pending())
            .field("draining", &self.draining.get())
            .finish()
    }
}

impl Default for UiScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl UiScheduler {
    /// Create a scheduler owned by the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: thread::current().id(),
            queue: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
        }
    }

    /// Run `task` now, or after the task currently running returns.
    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        debug_assert_eq!(
            thread::current().id(),
            self.owner,
            "UiScheduler used off its UI thread"
        );
        self.queue.borrow_mut().push_back(Box::new(task));
        if self.draining.get() {
            return;
        }
        self.drain();
    }

    /// Whether a task is running right now.
    #[inline]
    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.draining.get()
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Thread this scheduler delivers on.
    #[must_use]
    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    fn drain(&self) {
        self.draining.set(true);
        let _reset = DrainGuard(&self.draining);
        loop {
            // The queue borrow must end before the task runs.
            let next = self.queue.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            task();
        }
    }
}

struct DrainGuard<'a>(&'a Cell<bool>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
