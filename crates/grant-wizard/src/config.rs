//! Wizard configuration

use crate::error::{WizardError, WizardResult};
use crate::session::SessionProvider;
use grant_store::StorageKeys;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Id written into the submission summary when none is configured
pub const DEFAULT_PROJECT_ID: &str = "PRJ-001";

/// What `submit` checks before recording the submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    /// Every attempt is recorded, valid or not
    #[default]
    Permissive,
    /// Refuse while any rule fails or a required attachment is missing
    Strict,
}

/// Wizard configuration
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Debounce window for autosave; 0 writes on every change
    pub autosave_quiet_period_ms: u64,
    /// Submit gating
    pub submit_mode: SubmitMode,
    /// Id of the single project
    pub project_id: String,
    /// Prefix persisted keys with the signed-in user's id
    pub namespace_by_user: bool,
}

impl WizardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> WizardResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> WizardResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WizardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// With autosave quiet period
    #[inline]
    #[must_use]
    pub fn with_quiet_period(mut self, period: Duration) -> Self {
        self.autosave_quiet_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With submit mode
    #[inline]
    #[must_use]
    pub fn with_submit_mode(mut self, mode: SubmitMode) -> Self {
        self.submit_mode = mode;
        self
    }

    /// With project id
    #[inline]
    #[must_use]
    pub fn with_project_id(mut self, id: impl Into<String>) -> Self {
        self.project_id = id.into();
        self
    }

    /// With per-user key namespacing
    #[inline]
    #[must_use]
    pub fn with_namespace_by_user(mut self, enabled: bool) -> Self {
        self.namespace_by_user = enabled;
        self
    }

    /// Autosave quiet period
    #[inline]
    #[must_use]
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.autosave_quiet_period_ms)
    }

    /// Persisted keys for the current session
    ///
    /// Falls back to the plain keys when namespacing is off or nobody is
    /// signed in.
    #[must_use]
    pub fn storage_keys(&self, session: &dyn SessionProvider) -> StorageKeys {
        match session.current_user() {
            Some(user) if self.namespace_by_user => StorageKeys::namespaced(&user.id),
            _ => StorageKeys::default(),
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            autosave_quiet_period_ms: 400,
            submit_mode: SubmitMode::Permissive,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            namespace_by_user: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{StaticSession, UserIdentity};

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(WizardConfig::from_toml_str("").unwrap(), WizardConfig::default());
    }

    #[test]
    fn toml_overrides() {
        let config = WizardConfig::from_toml_str(
            r#"
            autosave_quiet_period_ms = 0
            submit_mode = "strict"
            project_id = "PRJ-042"
            "#,
        )
        .unwrap();
        assert_eq!(config.quiet_period(), Duration::ZERO);
        assert_eq!(config.submit_mode, SubmitMode::Strict);
        assert_eq!(config.project_id, "PRJ-042");
        assert!(!config.namespace_by_user);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = WizardConfig::from_toml_str("submit_mode = \"lenient\"").unwrap_err();
        assert!(matches!(err, WizardError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = WizardConfig::from_path("/nonexistent/grant.toml").unwrap_err();
        assert!(matches!(err, WizardError::ConfigRead { .. }));
    }

    #[test]
    fn keys_follow_namespacing() {
        let session = StaticSession::signed_in(UserIdentity::new("u7", "U", "u@example.org"));
        let plain = WizardConfig::new();
        assert_eq!(plain.storage_keys(&session).draft, "draft_submission");

        let namespaced = WizardConfig::new().with_namespace_by_user(true);
        assert_eq!(namespaced.storage_keys(&session).draft, "u7:draft_submission");
        assert_eq!(
            namespaced.storage_keys(&StaticSession::anonymous()).draft,
            "draft_submission"
        );
    }
}
