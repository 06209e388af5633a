use chrono::{DateTime, Utc};

pub type NotificationId = u64;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "toast toast--success",
            NotificationKind::Warning => "toast toast--warning",
            NotificationKind::Error => "toast toast--error",
            NotificationKind::Info => "toast toast--info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✅",
            NotificationKind::Warning => "⚠️",
            NotificationKind::Error => "❌",
            NotificationKind::Info => "ℹ️",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
