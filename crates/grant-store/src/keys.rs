//! Persisted key names

use serde::{Deserialize, Serialize};

/// Slot holding the draft snapshot
pub const DRAFT_KEY: &str = "draft_submission";
/// Slot holding the current step index
pub const STEP_INDEX_KEY: &str = "draft_step_index";
/// Slot holding the submission summary read by the dashboard
pub const SUBMISSION_META_KEY: &str = "submission_meta";

/// Key names for the three persisted slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageKeys {
    /// Draft snapshot key
    pub draft: String,
    /// Step index key
    pub step_index: String,
    /// Submission summary key
    pub submission_meta: String,
}

impl StorageKeys {
    /// Keys prefixed with `<user_id>:` so several users can share one backend
    #[must_use]
    pub fn namespaced(user_id: &str) -> Self {
        Self {
            draft: format!("{user_id}:{DRAFT_KEY}"),
            step_index: format!("{user_id}:{STEP_INDEX_KEY}"),
            submission_meta: format!("{user_id}:{SUBMISSION_META_KEY}"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            draft: DRAFT_KEY.to_string(),
            step_index: STEP_INDEX_KEY.to_string(),
            submission_meta: SUBMISSION_META_KEY.to_string(),
        }
    }
}
