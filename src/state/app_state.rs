// ============================================================================
// APP STATE - Page controllers plus routing
// ============================================================================
// Owns one controller per page. Navigation always goes through `navigate`,
// which applies the session guard before a page is activated, so a
// protected page never issues a request without a session.
// ============================================================================

use crate::models::session::Session;
use crate::state::context::AppContext;
use crate::state::route::{guard, Route};
use crate::viewmodels::{
    AuthViewModel, DocumentListViewModel, GenerationViewModel, StyleLearningViewModel,
    TokenUsageViewModel, UploadViewModel,
};

#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
    pub auth: AuthViewModel,
    pub upload: UploadViewModel,
    pub documents: DocumentListViewModel,
    pub style: StyleLearningViewModel,
    pub generation: GenerationViewModel,
    pub token_usage: TokenUsageViewModel,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        let state = Self {
            auth: AuthViewModel::new(ctx.clone()),
            upload: UploadViewModel::new(ctx.clone()),
            documents: DocumentListViewModel::new(ctx.clone()),
            style: StyleLearningViewModel::new(ctx.clone()),
            generation: GenerationViewModel::new(ctx.clone()),
            token_usage: TokenUsageViewModel::new(ctx.clone()),
            ctx,
        };

        // Controllers call `ctx.navigation.go`; route it through the guard
        let router = state.clone();
        state.ctx.navigation.install(move |route| {
            router.navigate(route);
        });

        let pages = state.clone();
        state.ctx.signed_out.subscribe(move || pages.clear_pages());
        state
    }

    pub fn current_route(&self) -> Route {
        self.ctx.navigation.current()
    }

    pub fn session(&self) -> Option<Session> {
        self.ctx.session.load()
    }

    /// Show `requested`, or the page the guard sends the user to instead
    pub fn navigate(&self, requested: Route) -> Route {
        let session = self.ctx.session.load();
        let mut target = guard(requested, session.as_ref());
        if session.is_some() && !target.requires_session() {
            target = Route::Upload;
        }
        if target != requested {
            log::info!("🔀 [ROUTER] {:?} -> {:?}", requested, target);
        } else {
            log::debug!("🔀 [ROUTER] {:?}", target);
        }

        self.ctx.navigation.set_current(target);
        self.activate(target);
        self.ctx.changed();
        target
    }

    fn activate(&self, route: Route) {
        match route {
            Route::Login | Route::Register => {}
            Route::Upload => self.upload.activate(),
            Route::Documents => self.documents.activate(),
            Route::StyleLearning => self.style.activate(),
            Route::Generate => self.generation.activate(),
            Route::TokenUsage => self.token_usage.activate(),
        }
    }

    /// Nothing loaded for one user may be shown to the next
    fn clear_pages(&self) {
        log::info!("🧹 [APP] Clearing per-user page state");
        self.upload.clear();
        self.documents.clear();
        self.style.clear();
        self.generation.clear();
        self.token_usage.clear();
    }

    pub fn logout(&self) {
        self.auth.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notification::NotificationKind;
    use crate::test_support::{json, TestEnv};

    #[test]
    fn protected_pages_redirect_without_any_request() {
        let env = TestEnv::new();
        let app = AppState::new(env.ctx.clone());

        for route in Route::NAVIGATION {
            assert_eq!(app.navigate(route), Route::Login);
            assert_eq!(app.current_route(), Route::Login);
        }
        env.run();
        assert_eq!(env.transport.request_count(), 0);
    }

    #[test]
    fn auth_pages_are_open() {
        let env = TestEnv::new();
        let app = AppState::new(env.ctx.clone());
        assert_eq!(app.navigate(Route::Register), Route::Register);
    }

    #[test]
    fn signed_in_users_skip_the_login_page() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());
        env.transport.reply_json(200, json!([]));
        assert_eq!(app.navigate(Route::Login), Route::Upload);
        env.run();
        assert_eq!(env.transport.request_count(), 1);
    }

    #[test]
    fn entering_a_page_loads_its_data() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());

        env.transport.reply_json(200, json!({ "totalTokens": 1 }));
        app.navigate(Route::TokenUsage);
        env.run();

        assert!(env
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/token-usage/stats/1"));
        assert!(app.token_usage.stats_state().data().is_some());
    }

    #[test]
    fn an_expired_token_anywhere_sends_the_user_to_login() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());

        env.transport.reply_json(401, json!({ "message": "expired" }));
        app.navigate(Route::Documents);
        env.run();

        assert!(env.ctx.session.load().is_none());
        assert_eq!(app.current_route(), Route::Login);
        assert_eq!(env.last_notification().unwrap().0, NotificationKind::Error);
    }

    #[test]
    fn logout_returns_to_login() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());
        env.transport.reply_json(200, json!([]));
        app.navigate(Route::Generate);
        env.run();

        app.logout();
        assert_eq!(app.current_route(), Route::Login);
        assert!(app.session().is_none());
    }

    fn second_user() -> Session {
        Session {
            user_id: 2,
            username: "other".into(),
            email: None,
            auth_token: "other-token".into(),
        }
    }

    #[test]
    fn the_next_user_never_sees_the_previous_users_documents() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());
        env.transport
            .reply_json(200, json!([{ "documentId": 1, "title": "A-private" }]));
        app.navigate(Route::Documents);
        env.run();
        assert_eq!(app.documents.visible_documents().len(), 1);

        app.logout();
        env.ctx.session.save(&second_user()).unwrap();
        let _reply = env.transport.defer();
        app.navigate(Route::Documents);
        env.run();

        assert!(app.documents.documents_state().is_loading());
        assert!(app.documents.visible_documents().is_empty());
        assert!(app.upload.documents_state().is_idle());
        assert!(env
            .transport
            .last_request()
            .unwrap()
            .url
            .ends_with("/mysql/documents/user/2"));
    }

    #[test]
    fn a_search_pending_at_logout_is_dropped() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());
        env.transport.reply_json(200, json!([]));
        app.navigate(Route::Documents);
        env.run();

        app.documents.set_keyword("보고서");
        app.logout();
        app.navigate(Route::Register);
        env.advance(300);

        assert_eq!(app.current_route(), Route::Register);
        assert_eq!(env.transport.request_count(), 1);
        assert!(app.documents.query().keyword.is_empty());
    }

    #[test]
    fn an_expired_token_also_clears_loaded_lists() {
        let env = TestEnv::logged_in();
        let app = AppState::new(env.ctx.clone());
        env.transport
            .reply_json(200, json!([{ "documentId": 1, "title": "a" }]));
        app.navigate(Route::Upload);
        env.run();
        assert!(app.upload.documents_state().data().is_some());

        env.transport.reply_json(401, json!({ "message": "expired" }));
        app.upload.refresh();
        env.run();

        assert!(app.upload.documents_state().is_idle());
        assert_eq!(app.current_route(), Route::Login);
    }
}
