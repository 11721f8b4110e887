//! Testing utilities for the grant wizard workspace
//!
//! Shared backends, fixtures and builders.

#![allow(missing_docs)]

use grant_model::{
    mime, Activity, BudgetCategory, BudgetLine, DocumentType, FileRef, Risk, SubmissionDraft,
};
use grant_store::{KeyValueStore, MemoryStore, StoreError, StoreResult};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Memory backend that counts writes per key
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: Mutex<HashMap<String, usize>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls seen for `key`
    pub fn writes(&self, key: &str) -> usize {
        self.writes.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_writes(&self) -> usize {
        self.writes.lock().values().sum()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        *self.writes.lock().entry(key.to_string()).or_default() += 1;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

/// Backend where every operation fails
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Backend(format!("read refused: {key}")))
    }

    fn set(&self, key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Backend(format!("quota exceeded: {key}")))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        Err(StoreError::Backend(format!("delete refused: {key}")))
    }
}

/// Memory backend that refuses writes to a single key
#[derive(Debug)]
pub struct RejectingStore {
    inner: MemoryStore,
    rejected: String,
}

impl RejectingStore {
    pub fn new(rejected: impl Into<String>) -> Self {
        Self {
            inner: MemoryStore::new(),
            rejected: rejected.into(),
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }
}

impl KeyValueStore for RejectingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if key == self.rejected {
            return Err(StoreError::Backend(format!("quota exceeded: {key}")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}

/// `n` whitespace-separated words
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

/// File of `size` zero bytes with the given mime type
pub fn file_of(mime_type: &str, size: usize) -> FileRef {
    let extension = match mime_type {
        mime::PDF => "pdf",
        mime::PNG => "png",
        mime::JPEG => "jpg",
        mime::TEXT => "txt",
        _ => "bin",
    };
    FileRef::new(format!("fixture.{extension}"), mime_type, vec![0u8; size])
}

/// Draft that passes every rule and has every required attachment
pub fn sample_draft() -> SubmissionDraft {
    let mut draft = SubmissionDraft::seeded();
    draft.applicant.org_name = "Delta Growers Cooperative".into();
    draft.applicant.contact_email = "contact@delta.example".into();
    draft.proposal.title = "Mangrove restoration in the lower delta".into();
    draft.proposal.location_and_target = words(40);
    draft.objectives.objectives = words(60);
    draft.objectives.expected_results = words(30);
    draft.objectives.duration_months = 18;

    draft.activities.toggle_month(0, 1);
    draft.activities.append(Activity::new("Nursery planting", [2, 3, 4]));
    draft.risks.append(Risk::new("Drought", "Drip irrigation at the nursery"));

    draft.budget_lines[0].total = 4_000.0;
    draft
        .budget_lines
        .append(BudgetLine::new(BudgetCategory::Investment, "Seedlings", 5_000.0).with_split(4_000.0, 1_000.0));
    draft
        .budget_lines
        .append(BudgetLine::new(BudgetCategory::Operating, "Coordination", 900.0));

    for slot in DocumentType::ALL.into_iter().filter(|d| d.is_required()) {
        draft.attachments.set(slot, file_of(mime::PDF, 1024));
    }
    draft
}
