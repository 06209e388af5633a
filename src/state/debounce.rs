// ============================================================================
// DEBOUNCE - Run a task once input has been quiet for a while
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::platform::{Scheduler, TimerHandle};

#[derive(Clone)]
pub struct Debouncer {
    delay_ms: u32,
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<RefCell<Option<TimerHandle>>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            delay_ms,
            scheduler,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Schedule `task`, cancelling whatever was pending
    pub fn trigger<F>(&self, task: F)
    where
        F: FnOnce() + 'static,
    {
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(task));
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        drop(previous);
    }
}
