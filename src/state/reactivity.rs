// ============================================================================
// REACTIVITY - Change notifications towards the renderer
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Controllers call `notify()` after a state transition; the mounted app
/// subscribes once and schedules a re-render.
#[derive(Clone, Default)]
pub struct ChangeHub {
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify(&self) {
        // Snapshot so a callback may subscribe without a double borrow
        let subscribers: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn every_subscriber_is_called() {
        let hub = ChangeHub::new();
        let count = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let count = count.clone();
            hub.subscribe(move || count.set(count.get() + 1));
        }
        hub.notify();
        hub.clone().notify();
        assert_eq!(count.get(), 4);
    }
}
