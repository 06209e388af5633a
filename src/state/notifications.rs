// ============================================================================
// NOTIFICATIONS - Transient toasts with auto-expiry
// ============================================================================
// Insertion-ordered, stacking, memory-resident. Each toast removes itself
// after the configured TTL unless it was dismissed earlier.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::models::notification::{Notification, NotificationId, NotificationKind};
use crate::state::platform::Scheduler;
use crate::state::reactivity::ChangeHub;

#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: NotificationId,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> NotificationId {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            kind,
            message: message.into(),
            created_at: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

/// Shared handle controllers use to raise toasts
#[derive(Clone)]
pub struct Notifier {
    center: Rc<RefCell<NotificationCenter>>,
    scheduler: Rc<dyn Scheduler>,
    changes: ChangeHub,
    ttl_ms: u32,
}

impl Notifier {
    pub fn new(scheduler: Rc<dyn Scheduler>, changes: ChangeHub, ttl_ms: u32) -> Self {
        Self {
            center: Rc::new(RefCell::new(NotificationCenter::new())),
            scheduler,
            changes,
            ttl_ms,
        }
    }

    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        let message = message.into();
        match kind {
            NotificationKind::Error => log::error!("❌ [TOAST] {}", message),
            NotificationKind::Warning => log::warn!("⚠️ [TOAST] {}", message),
            _ => log::info!("🔔 [TOAST] {}", message),
        }

        let id = self.center.borrow_mut().push(kind, message, Utc::now());

        let notifier = self.clone();
        self.scheduler
            .schedule(self.ttl_ms, Box::new(move || notifier.dismiss(id)))
            .detach();

        self.changes.notify();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(NotificationKind::Info, message)
    }

    /// No-op when the toast already expired
    pub fn dismiss(&self, id: NotificationId) {
        let removed = self.center.borrow_mut().dismiss(id);
        if removed {
            self.changes.notify();
        }
    }

    pub fn items(&self) -> Vec<Notification> {
        self.center.borrow().items().to_vec()
    }
}
