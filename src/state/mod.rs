// ============================================================================
// STATE MODULE - Rc<RefCell> state, request lifecycles and app wiring
// ============================================================================

pub mod platform;
pub mod reactivity;
pub mod request_state;
pub mod notifications;
pub mod debounce;
pub mod route;
pub mod context;
pub mod app_state;

pub use reactivity::ChangeHub;
pub use request_state::{Operation, RequestState, RequestTicket};
pub use notifications::{NotificationCenter, Notifier};
pub use debounce::Debouncer;
pub use route::{guard, Route};
pub use context::{AppContext, Navigation};
pub use app_state::AppState;
