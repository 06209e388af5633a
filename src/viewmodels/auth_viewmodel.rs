// ============================================================================
// AUTH VIEWMODEL - Login, registration and logout
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::models::session::Session;
use crate::services::error::{ApiError, ErrorInfo};
use crate::state::context::AppContext;
use crate::state::request_state::{Operation, RequestState, RequestTicket};
use crate::state::route::Route;
use crate::viewmodels::validation::{validate_login, validate_registration};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Clone)]
pub struct AuthViewModel {
    ctx: AppContext,
    login_form: Rc<RefCell<LoginForm>>,
    register_form: Rc<RefCell<RegisterForm>>,
    login: Operation<Session>,
    register: Operation<Session>,
}

impl AuthViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            login_form: Rc::new(RefCell::new(LoginForm::default())),
            register_form: Rc::new(RefCell::new(RegisterForm::default())),
            login: Operation::new(),
            register: Operation::new(),
        }
    }

    pub fn login_form(&self) -> LoginForm {
        self.login_form.borrow().clone()
    }

    pub fn register_form(&self) -> RegisterForm {
        self.register_form.borrow().clone()
    }

    /// Form edits do not re-render; the inputs already show what was typed
    pub fn edit_login(&self, f: impl FnOnce(&mut LoginForm)) {
        f(&mut self.login_form.borrow_mut());
    }

    pub fn edit_register(&self, f: impl FnOnce(&mut RegisterForm)) {
        f(&mut self.register_form.borrow_mut());
    }

    pub fn login_state(&self) -> RequestState<Session> {
        self.login.state()
    }

    pub fn register_state(&self) -> RequestState<Session> {
        self.register.state()
    }

    pub fn login(&self) {
        let form = self.login_form();
        if let Err(error) = validate_login(&form.email, &form.password) {
            self.ctx.notifier.warning(error.to_string());
            return;
        }

        let request = LoginRequest {
            email: form.email.trim().to_string(),
            password: form.password,
        };
        log::info!("🔐 [AUTH] Logging in as {}", request.email);

        let ticket = self.login.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.login(&request).await;
            vm.complete(&vm.login, ticket, result, "로그인에 실패했습니다.");
        });
    }

    pub fn register(&self) {
        let form = self.register_form();
        if let Err(error) =
            validate_registration(&form.username, &form.email, &form.password, &form.confirm)
        {
            self.ctx.notifier.warning(error.to_string());
            return;
        }

        let request = RegisterRequest {
            username: form.username.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
        };
        log::info!("📝 [AUTH] Registering {}", request.username);

        let ticket = self.register.begin();
        self.ctx.changed();

        let vm = self.clone();
        self.ctx.spawn(async move {
            let result = vm.ctx.api.register(&request).await;
            vm.complete(&vm.register, ticket, result, "회원가입에 실패했습니다.");
        });
    }

    fn complete(
        &self,
        operation: &Operation<Session>,
        ticket: RequestTicket,
        result: Result<AuthResponse, ApiError>,
        fallback: &str,
    ) {
        if !operation.is_current(ticket) {
            return;
        }

        // A 401 here means bad credentials, not an expired session
        let outcome = match result {
            Ok(response) => Session::from_auth(&response).ok_or_else(|| {
                ErrorInfo::new(response.message.unwrap_or_else(|| fallback.to_string()))
            }),
            Err(ApiError::Unauthorized) => Err(ErrorInfo {
                message: fallback.to_string(),
                status: Some(401),
            }),
            Err(error) => Err(ErrorInfo::from(&error)),
        };

        match outcome {
            Ok(session) => match self.ctx.session.save(&session) {
                Ok(()) => {
                    log::info!("✅ [AUTH] Signed in as {}", session.username);
                    operation.finish::<ErrorInfo>(ticket, Ok(session.clone()));
                    self.clear_forms();
                    self.ctx
                        .notifier
                        .success(format!("{}님, 환영합니다!", session.username));
                    self.ctx.navigation.go(Route::Upload);
                }
                Err(error) => {
                    log::error!("❌ [AUTH] {}", error);
                    operation.finish(ticket, Err(ErrorInfo::new(error.to_string())));
                    self.ctx.notifier.error(error.to_string());
                }
            },
            Err(info) => {
                self.ctx.notifier.error(info.message.clone());
                operation.finish(ticket, Err(info));
            }
        }
        self.ctx.changed();
    }

    fn clear_forms(&self) {
        *self.login_form.borrow_mut() = LoginForm::default();
        *self.register_form.borrow_mut() = RegisterForm::default();
    }

    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logging out");
        self.ctx.end_session();
        self.login.reset();
        self.register.reset();
        self.clear_forms();
        self.ctx.notifier.info("로그아웃되었습니다.");
        self.ctx.navigation.go(Route::Login);
    }
}
