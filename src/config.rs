// ============================================================================
// CONFIG - Compile-time configuration (values injected by build.rs from .env)
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    BACKEND_URL, DEFAULT_MAX_UPLOAD_MB, DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_SEARCH_DEBOUNCE_MS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub notification_ttl_ms: u32,
    pub search_debounce_ms: u32,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Build the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: BACKEND_URL.trim_end_matches('/').to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development")
                .to_string(),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            notification_ttl_ms: parse_or(
                option_env!("NOTIFICATION_TTL_MS"),
                defaults.notification_ttl_ms,
            ),
            search_debounce_ms: parse_or(
                option_env!("SEARCH_DEBOUNCE_MS"),
                defaults.search_debounce_ms,
            ),
            max_upload_bytes: parse_or(option_env!("MAX_UPLOAD_MB"), DEFAULT_MAX_UPLOAD_MB)
                * 1024
                * 1024,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn log_level(&self) -> log::Level {
        match (self.enable_logging, self.is_production()) {
            (false, _) => log::Level::Error,
            (true, true) => log::Level::Info,
            (true, false) => log::Level::Debug,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
