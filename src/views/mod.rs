// ============================================================================
// VIEWS - Functions that turn state into DOM (no logic of their own)
// ============================================================================

pub mod app;
pub mod auth;
pub mod documents;
pub mod generation_view;
pub mod shared;
pub mod style_learning_view;
pub mod token_usage_view;
pub mod upload_view;

pub use app::render_app;
