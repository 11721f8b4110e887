//! Submission summary read by the dashboard

use crate::error::{StoreError, StoreResult};
use crate::kv::SharedStore;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Lifecycle of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Being edited
    #[default]
    Draft,
    /// Handed in
    Submitted,
    /// Under review by the funder
    InReview,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    /// Persisted name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "DRAFT",
            SubmissionStatus::Submitted => "SUBMITTED",
            SubmissionStatus::InReview => "IN_REVIEW",
            SubmissionStatus::Accepted => "ACCEPTED",
            SubmissionStatus::Rejected => "REJECTED",
        }
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project id, title, status and last change time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: SubmissionStatus,
    /// Milliseconds since the Unix epoch
    pub updated_at: i64,
}

impl SubmissionSummary {
    /// Create summary stamped with the current time
    #[must_use]
    pub fn new(id: impl Into<String>, status: SubmissionStatus) -> Self {
        Self {
            id: id.into(),
            title: None,
            status,
            updated_at: now_millis(),
        }
    }

    /// Attach a title; blank titles are dropped
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
        self
    }

    /// Move to `status` and refresh the timestamp
    pub fn mark(&mut self, status: SubmissionStatus) {
        self.status = status;
        self.updated_at = now_millis();
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Reads and writes the summary slot
#[derive(Debug, Clone)]
pub struct MetaStore {
    kv: SharedStore,
    key: String,
}

impl MetaStore {
    /// Create store over `kv` using `key`
    #[must_use]
    pub fn new(kv: SharedStore, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    /// Key in use
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the summary; absent, unreadable or malformed slots read as `None`
    #[must_use]
    pub fn load(&self) -> Option<SubmissionSummary> {
        let raw = match self.kv.get(&self.key) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "summary slot unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(summary) => Some(summary),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "malformed submission summary ignored");
                None
            }
        }
    }

    /// Replace the summary
    pub fn save(&self, summary: &SubmissionSummary) -> StoreResult<()> {
        let json = serde_json::to_string(summary).map_err(|e| StoreError::serialize(&self.key, e))?;
        self.kv.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, id = %summary.id, status = %summary.status, "summary written");
        Ok(())
    }

    /// Delete the summary
    pub fn clear(&self) -> StoreResult<()> {
        self.kv.remove(&self.key)
    }
}
