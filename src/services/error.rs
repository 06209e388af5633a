// ============================================================================
// API ERRORS - Uniform failure shape for every backend call
// ============================================================================

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built (serialization, FormData, ...)
    #[error("Request build error: {0}")]
    Request(String),

    /// 401 from the backend
    #[error("Unauthorized")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body does not match the expected schema
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "서버에 연결할 수 없습니다.".to_string(),
            ApiError::Request(reason) => reason.clone(),
            ApiError::Unauthorized => "로그인이 필요합니다.".to_string(),
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Decode(_) => "서버 응답을 해석할 수 없습니다.".to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// What a controller keeps in `RequestState::Failure`
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub message: String,
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }
}

impl From<&ApiError> for ErrorInfo {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.user_message(),
            status: error.status(),
        }
    }
}

impl From<ApiError> for ErrorInfo {
    fn from(error: ApiError) -> Self {
        Self::from(&error)
    }
}
