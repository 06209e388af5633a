/// Base URL of the backend REST API.
/// Set at compile time through the `BACKEND_URL` environment variable (see `.env.example`).
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api",
};

/// localStorage key holding the raw auth token
pub const TOKEN_KEY: &str = "token";
/// localStorage key holding the serialized user
pub const USER_KEY: &str = "user";

pub const DEFAULT_NOTIFICATION_TTL_MS: u32 = 2000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 300;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

/// Extensions accepted by the upload form (lowercase, without the dot)
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["txt", "docx", "pdf"];

/// Document types offered by the generation form and the list filter
pub const DOCUMENT_TYPES: &[&str] = &["보고서", "제안서", "이메일", "기획서", "메모"];
pub const DEFAULT_DOCUMENT_TYPE: &str = "보고서";

/// Style learning needs at least this many uploaded documents
pub const MIN_DOCUMENTS_FOR_STYLE_LEARNING: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Estimated cost in KRW per 1000 tokens
pub const KRW_PER_1000_TOKENS: f64 = 7.0;
