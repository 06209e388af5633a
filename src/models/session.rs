use serde::{Deserialize, Serialize};

use crate::models::auth::{AuthResponse, UserInfo};

/// Persisted identity. Built only when every field is known.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub auth_token: String,
}

impl Session {
    pub fn new(user: UserInfo, auth_token: String) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            auth_token,
        }
    }

    /// A successful auth response carrying both token and user
    pub fn from_auth(response: &AuthResponse) -> Option<Self> {
        if !response.success {
            return None;
        }
        let token = response.token.as_ref().filter(|t| !t.is_empty())?;
        let user = response.user.clone()?;
        Some(Self::new(user, token.clone()))
    }

    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}
