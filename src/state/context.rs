// ============================================================================
// APP CONTEXT - Everything a controller needs, passed explicitly
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::models::session::Session;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::services::session_service::SessionHolder;
use crate::services::transport::{BrowserTransport, Transport};
use crate::state::notifications::Notifier;
use crate::state::platform::{
    BrowserFileSink, BrowserScheduler, BrowserSpawner, FileSink, Scheduler, Spawner,
};
use crate::state::reactivity::ChangeHub;
use crate::state::route::Route;
use crate::utils::storage::{BrowserStore, KeyValueStore};

type NavigateFn = Rc<dyn Fn(Route)>;

/// Current page plus the hook the app state installs to perform navigation
#[derive(Clone)]
pub struct Navigation {
    current: Rc<RefCell<Route>>,
    handler: Rc<RefCell<Option<NavigateFn>>>,
}

impl Navigation {
    fn new() -> Self {
        Self {
            current: Rc::new(RefCell::new(Route::Login)),
            handler: Rc::new(RefCell::new(None)),
        }
    }

    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    pub(crate) fn set_current(&self, route: Route) {
        *self.current.borrow_mut() = route;
    }

    pub(crate) fn install<F>(&self, handler: F)
    where
        F: Fn(Route) + 'static,
    {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    /// Ask for another page; guards and page activation run in the handler
    pub fn go(&self, route: Route) {
        let handler = self.handler.borrow().clone();
        match handler {
            Some(navigate) => navigate(route),
            None => self.set_current(route),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub api: ApiClient,
    pub session: SessionHolder,
    pub notifier: Notifier,
    pub scheduler: Rc<dyn Scheduler>,
    pub spawner: Rc<dyn Spawner>,
    pub files: Rc<dyn FileSink>,
    pub changes: ChangeHub,
    /// Fired when the session ends; every page forgets the user's data
    pub signed_out: ChangeHub,
    pub navigation: Navigation,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn Transport>,
        store: Rc<dyn KeyValueStore>,
        scheduler: Rc<dyn Scheduler>,
        spawner: Rc<dyn Spawner>,
        files: Rc<dyn FileSink>,
    ) -> Self {
        let session = SessionHolder::new(store);
        let api = ApiClient::new(config.backend_url.clone(), transport, session.clone());
        let changes = ChangeHub::new();
        let notifier = Notifier::new(scheduler.clone(), changes.clone(), config.notification_ttl_ms);

        Self {
            config: Rc::new(config),
            api,
            session,
            notifier,
            scheduler,
            spawner,
            files,
            changes,
            signed_out: ChangeHub::new(),
            navigation: Navigation::new(),
        }
    }

    /// Wired to fetch, localStorage, setTimeout and spawn_local
    pub fn browser(config: AppConfig) -> Self {
        Self::new(
            config,
            Rc::new(BrowserTransport),
            Rc::new(BrowserStore),
            Rc::new(BrowserScheduler),
            Rc::new(BrowserSpawner),
            Rc::new(BrowserFileSink),
        )
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.spawner.spawn(Box::pin(task));
    }

    /// Ask the renderer to redraw
    pub fn changed(&self) {
        self.changes.notify();
    }

    /// Session for a protected action; redirects to login when there is none
    pub fn require_session(&self) -> Option<Session> {
        let session = self.session.load();
        if session.is_none() {
            log::warn!("🔒 [AUTH] No session, redirecting to login");
            self.navigation.go(Route::Login);
        }
        session
    }

    /// Drop the stored session and tell the pages to clear per-user state
    pub fn end_session(&self) {
        self.session.clear();
        self.signed_out.notify();
    }

    /// Surface a failed call. An expired/invalid token ends the session.
    pub fn report_error(&self, action: &str, error: &ApiError) {
        if matches!(error, ApiError::Unauthorized) {
            self.end_session();
            self.notifier
                .error("세션이 만료되었습니다. 다시 로그인해주세요.");
            self.navigation.go(Route::Login);
            return;
        }
        self.notifier
            .error(format!("{}: {}", action, error.user_message()));
    }
}
