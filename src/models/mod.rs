use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod session;
pub mod document;
pub mod generation;
pub mod style;
pub mod token_usage;
pub mod notification;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
pub use session::Session;
pub use document::{
    DocumentDetail, DocumentId, DocumentSummary, DownloadArtifact, DownloadFormat, SelectedFile,
    SummaryInfo, UploadAck,
};
pub use generation::{DocumentLength, DownloadAction, GeneratedDocument, GenerationRequest};
pub use style::StyleLearningResult;
pub use token_usage::{DailyUsage, TokenUsageStats, UsageRecord};
pub use notification::{Notification, NotificationId, NotificationKind};

/// `#[serde(default)]` only covers a missing key; this also maps `null` to
/// the field's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
