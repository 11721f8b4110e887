//! Draft snapshot slots
//!
//! Reads never fail: a missing, unreadable or malformed snapshot is reported
//! as "no draft" and the wizard falls back to its seed state. Writes return
//! their error so the caller decides how loudly to complain.

use crate::error::{StoreError, StoreResult};
use crate::keys::StorageKeys;
use crate::kv::SharedStore;
use grant_model::{SubmissionDraft, WizardState, STEP_COUNT};

/// Snapshot persistence for one wizard
#[derive(Debug, Clone)]
pub struct DraftStore {
    kv: SharedStore,
    keys: StorageKeys,
}

impl DraftStore {
    /// Create store over `kv` using `keys`
    #[inline]
    #[must_use]
    pub fn new(kv: SharedStore, keys: StorageKeys) -> Self {
        Self { kv, keys }
    }

    /// Keys in use
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Backend in use
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &SharedStore {
        &self.kv
    }

    /// Write the draft and the step index to their slots
    pub fn save_snapshot(&self, state: &WizardState) -> StoreResult<()> {
        self.save_draft(&state.draft)?;
        self.save_step(state.current_step)
    }

    /// Write the draft slot
    ///
    /// A draft holding a NaN or infinite budget amount is refused: it would
    /// be written as `null` and the whole snapshot would fail to load. The
    /// previous snapshot stays in place.
    pub fn save_draft(&self, draft: &SubmissionDraft) -> StoreResult<()> {
        if let Some(index) = draft.budget_lines.iter().position(|line| !line.has_finite_amounts()) {
            return Err(StoreError::serialize(
                &self.keys.draft,
                serde::ser::Error::custom(format!("budget line {index} has a non-finite amount")),
            ));
        }
        let json = serde_json::to_string(draft).map_err(|e| StoreError::serialize(&self.keys.draft, e))?;
        self.kv.set(&self.keys.draft, &json)?;
        tracing::debug!(key = %self.keys.draft, bytes = json.len(), "draft snapshot written");
        Ok(())
    }

    /// Write the step index slot
    pub fn save_step(&self, step: usize) -> StoreResult<()> {
        self.kv.set(&self.keys.step_index, &step.to_string())
    }

    /// Read the draft slot
    ///
    /// Returns `None` when the slot is empty, unreadable or does not decode.
    #[must_use]
    pub fn load_snapshot(&self) -> Option<SubmissionDraft> {
        let raw = match self.kv.get(&self.keys.draft) {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(key = %self.keys.draft, error = %err, "draft slot unreadable, starting fresh");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                tracing::warn!(key = %self.keys.draft, error = %err, "malformed draft snapshot ignored");
                None
            }
        }
    }

    /// Read the step index slot, clamped to the wizard's steps
    ///
    /// Missing or unparseable values resume at the first step.
    #[must_use]
    pub fn load_step(&self) -> usize {
        let raw = match self.kv.get(&self.keys.step_index) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(err) => {
                tracing::warn!(key = %self.keys.step_index, error = %err, "step slot unreadable");
                return 0;
            }
        };
        match raw.trim().parse::<i64>() {
            Ok(step) => usize::try_from(step.clamp(0, STEP_COUNT as i64 - 1)).unwrap_or(0),
            Err(_) => 0,
        }
    }

    /// Read both slots
    #[must_use]
    pub fn load_state(&self) -> Option<WizardState> {
        self.load_snapshot().map(|draft| WizardState {
            draft,
            current_step: self.load_step(),
        })
    }

    /// Delete the draft slot; the step index is left alone
    pub fn clear_draft(&self) -> StoreResult<()> {
        self.kv.remove(&self.keys.draft)?;
        tracing::info!(key = %self.keys.draft, "draft cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use grant_model::{Activity, Risk};
    use std::sync::Arc;

    fn store() -> (Arc<MemoryStore>, DraftStore) {
        let kv = Arc::new(MemoryStore::new());
        let drafts = DraftStore::new(kv.clone(), StorageKeys::default());
        (kv, drafts)
    }

    #[test]
    fn empty_store_has_no_draft() {
        let (_, drafts) = store();
        assert!(drafts.load_snapshot().is_none());
        assert_eq!(drafts.load_step(), 0);
    }

    #[test]
    fn snapshot_round_trip() {
        let (_, drafts) = store();
        let mut draft = SubmissionDraft::seeded();
        draft.activities.append(Activity::new("Survey", [1, 2, 3]));
        draft.risks.append(Risk::new("Flooding", "Schedule in dry season"));

        let state = WizardState {
            draft: draft.clone(),
            current_step: 4,
        };
        drafts.save_snapshot(&state).unwrap();

        assert_eq!(drafts.load_snapshot(), Some(draft));
        assert_eq!(drafts.load_state(), Some(state));
    }

    #[test]
    fn malformed_snapshot_reads_as_absent() {
        let (kv, drafts) = store();
        kv.set("draft_submission", "{not json").unwrap();
        assert!(drafts.load_snapshot().is_none());

        kv.set("draft_submission", r#"{"activities": "nope"}"#).unwrap();
        assert!(drafts.load_snapshot().is_none());
    }

    #[test]
    fn non_finite_amount_keeps_previous_snapshot() {
        let (kv, drafts) = store();
        let mut draft = SubmissionDraft::seeded();
        draft.proposal.title = "Keep me".into();
        drafts.save_draft(&draft).unwrap();

        draft.budget_lines[0].total = f64::NAN;
        let err = drafts.save_draft(&draft).unwrap_err();
        assert!(matches!(err, StoreError::Serialize { .. }));

        draft.budget_lines[0].total = 0.0;
        draft.budget_lines[0].part_cofinance = f64::INFINITY;
        assert!(drafts.save_draft(&draft).is_err());

        assert!(kv.contains("draft_submission"));
        let stored = drafts.load_snapshot().unwrap();
        assert_eq!(stored.proposal.title, "Keep me");
        assert_eq!(stored.budget_lines[0].total, 0.0);
    }

    #[test]
    fn step_index_is_clamped() {
        let (kv, drafts) = store();
        kv.set("draft_step_index", "42").unwrap();
        assert_eq!(drafts.load_step(), 9);
        kv.set("draft_step_index", "-3").unwrap();
        assert_eq!(drafts.load_step(), 0);
        kv.set("draft_step_index", "seven").unwrap();
        assert_eq!(drafts.load_step(), 0);
        kv.set("draft_step_index", "6").unwrap();
        assert_eq!(drafts.load_step(), 6);
    }

    #[test]
    fn clear_draft_keeps_step() {
        let (kv, drafts) = store();
        drafts
            .save_snapshot(&WizardState {
                draft: SubmissionDraft::seeded(),
                current_step: 3,
            })
            .unwrap();

        drafts.clear_draft().unwrap();
        assert!(!kv.contains("draft_submission"));
        assert_eq!(drafts.load_step(), 3);
    }
}
