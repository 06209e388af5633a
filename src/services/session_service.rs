// ============================================================================
// SESSION HOLDER - Persisted identity (token + user in localStorage)
// ============================================================================
// The session lives in two independent entries. It is either fully present
// or fully absent: a lone token or an unreadable user counts as "no session".
// ============================================================================

use std::rc::Rc;

use crate::models::auth::UserInfo;
use crate::models::session::Session;
use crate::utils::constants::{TOKEN_KEY, USER_KEY};
use crate::utils::storage::{KeyValueStore, StorageError};

#[derive(Clone)]
pub struct SessionHolder {
    store: Rc<dyn KeyValueStore>,
}

impl SessionHolder {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())?;
        let raw_user = self.store.get(USER_KEY)?;
        match serde_json::from_str::<UserInfo>(&raw_user) {
            Ok(user) => Some(Session::new(user, token)),
            Err(e) => {
                log::warn!("⚠️ [SESSION] Stored user is unreadable, ignoring session: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(&session.user_info()).map_err(|e| {
            StorageError::Write {
                key: USER_KEY.to_string(),
                reason: e.to_string(),
            }
        })?;

        self.store.set(USER_KEY, &user_json)?;
        if let Err(e) = self.store.set(TOKEN_KEY, &session.auth_token) {
            self.store.remove(USER_KEY);
            return Err(e);
        }

        log::info!("💾 [SESSION] Session saved for user {}", session.user_id);
        Ok(())
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        log::info!("🚪 [SESSION] Session cleared");
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|session| session.auth_token)
    }
}
