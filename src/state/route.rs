// ============================================================================
// ROUTES - Hash-based pages and the session guard
// ============================================================================

use crate::models::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Upload,
    Documents,
    StyleLearning,
    Generate,
    TokenUsage,
}

impl Route {
    /// Pages shown in the navigation bar, in order
    pub const NAVIGATION: [Route; 5] = [
        Route::Upload,
        Route::Documents,
        Route::StyleLearning,
        Route::Generate,
        Route::TokenUsage,
    ];

    pub fn from_hash(hash: &str) -> Route {
        let path = hash.trim_start_matches('#');
        let path = path.split('?').next().unwrap_or("");
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/documents" => Route::Documents,
            "/learn" => Route::StyleLearning,
            "/generate" => Route::Generate,
            "/token-usage" => Route::TokenUsage,
            _ => Route::Upload,
        }
    }

    pub fn to_hash(&self) -> &'static str {
        match self {
            Route::Login => "#/login",
            Route::Register => "#/register",
            Route::Upload => "#/",
            Route::Documents => "#/documents",
            Route::StyleLearning => "#/learn",
            Route::Generate => "#/generate",
            Route::TokenUsage => "#/token-usage",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Login => "로그인",
            Route::Register => "회원가입",
            Route::Upload => "문서 업로드",
            Route::Documents => "문서 관리",
            Route::StyleLearning => "문체 학습",
            Route::Generate => "문서 생성",
            Route::TokenUsage => "토큰 사용량",
        }
    }
}

/// The page that is actually shown for a request: protected pages without a
/// session go to the login view.
pub fn guard(requested: Route, session: Option<&Session>) -> Route {
    if requested.requires_session() && session.is_none() {
        Route::Login
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: 1,
            username: "u".into(),
            email: None,
            auth_token: "t".into(),
        }
    }

    #[test]
    fn hash_round_trip_for_every_page() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Upload,
            Route::Documents,
            Route::StyleLearning,
            Route::Generate,
            Route::TokenUsage,
        ] {
            assert_eq!(Route::from_hash(route.to_hash()), route);
        }
    }

    #[test]
    fn unknown_hashes_land_on_upload() {
        assert_eq!(Route::from_hash(""), Route::Upload);
        assert_eq!(Route::from_hash("#/nowhere"), Route::Upload);
        assert_eq!(Route::from_hash("#/generate/?x=1"), Route::Generate);
    }

    #[test]
    fn guard_redirects_protected_pages_only() {
        assert_eq!(guard(Route::Generate, None), Route::Login);
        assert_eq!(guard(Route::Register, None), Route::Register);
        assert_eq!(guard(Route::Generate, Some(&session())), Route::Generate);
    }
}
