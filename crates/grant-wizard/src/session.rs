//! Current-user collaborator
//!
//! The wizard never authenticates anyone. It only asks whether a user is
//! present and, when keys are namespaced, what their id is.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Stable identifier, used as key prefix
    pub id: String,
    pub full_name: String,
    pub email: String,
}

impl UserIdentity {
    /// Create identity
    #[must_use]
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Local development identity with a `dev-<millis>` id
    #[must_use]
    pub fn dev(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        let id = format!("dev-{}", chrono::Utc::now().timestamp_millis());
        Self::new(id, full_name, email)
    }
}

/// Supplies the current user, if any
pub trait SessionProvider: Debug + Send + Sync {
    /// Signed-in user, `None` when nobody is
    fn current_user(&self) -> Option<UserIdentity>;

    /// Check if somebody is signed in
    fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }
}

/// Session fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user: Option<UserIdentity>,
}

impl StaticSession {
    /// Session with `user` signed in
    #[inline]
    #[must_use]
    pub fn signed_in(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    /// Session with nobody signed in
    #[inline]
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_identity_prefix() {
        let user = UserIdentity::dev("Awa Diop", "awa@example.org");
        assert!(user.id.starts_with("dev-"));
        assert_eq!(user.full_name, "Awa Diop");
    }

    #[test]
    fn static_session() {
        assert!(!StaticSession::anonymous().is_signed_in());
        let session = StaticSession::signed_in(UserIdentity::new("u1", "U", "u@example.org"));
        assert_eq!(session.current_user().map(|u| u.id), Some("u1".to_string()));
    }
}
