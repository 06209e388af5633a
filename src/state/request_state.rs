// ============================================================================
// REQUEST STATE - Lifecycle of one asynchronous operation
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::services::error::ErrorInfo;

#[derive(Clone, Debug, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(ErrorInfo),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            RequestState::Failure(error) => Some(error),
            _ => None,
        }
    }
}

/// Proof that a request was issued; only the latest ticket may land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// A `RequestState` plus the sequence number of the latest issued request.
/// Responses carrying an older ticket are dropped, so a slow stale response
/// can never overwrite a newer one.
pub struct Operation<T> {
    state: Rc<RefCell<RequestState<T>>>,
    latest: Rc<Cell<u64>>,
    settled: Rc<Cell<u64>>,
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            latest: self.latest.clone(),
            settled: self.settled.clone(),
        }
    }
}

impl<T> Default for Operation<T> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(RequestState::Idle)),
            latest: Rc::new(Cell::new(0)),
            settled: Rc::new(Cell::new(0)),
        }
    }
}

impl<T: Clone> Operation<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for rendering
    pub fn state(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Borrow the current state without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&RequestState<T>) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Move to `Loading` and hand out the ticket for this request
    pub fn begin(&self) -> RequestTicket {
        let ticket = self.issue();
        *self.state.borrow_mut() = RequestState::Loading;
        ticket
    }

    /// Hand out a ticket but keep showing the current state (background refresh)
    pub fn issue(&self) -> RequestTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestTicket(next)
    }

    /// A request is in flight, whether or not the state shows `Loading`
    pub fn is_pending(&self) -> bool {
        self.settled.get() != self.latest.get()
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Land a response. Returns `false` (and changes nothing) for stale tickets.
    pub fn finish<E: Into<ErrorInfo>>(&self, ticket: RequestTicket, result: Result<T, E>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("🗑️ [STATE] Discarding stale response #{}", ticket.0);
            return false;
        }
        *self.state.borrow_mut() = match result {
            Ok(data) => RequestState::Success(data),
            Err(error) => RequestState::Failure(error.into()),
        };
        self.settled.set(ticket.0);
        true
    }

    /// Land a response without touching the state
    pub fn settle(&self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.settled.set(ticket.0);
        true
    }

    /// Back to `Idle`; anything still in flight becomes stale
    pub fn reset(&self) {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        self.settled.set(next);
        *self.state.borrow_mut() = RequestState::Idle;
    }

    /// Edit the successful payload in place (optimistic list updates)
    pub fn update_data(&self, f: impl FnOnce(&mut T)) {
        if let RequestState::Success(data) = &mut *self.state.borrow_mut() {
            f(data);
        }
    }
}
