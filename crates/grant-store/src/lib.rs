//! Grant Draft Store
//!
//! Persistence for the wizard: a key-value seam, the draft snapshot slots,
//! debounced autosave, and the per-user submission summary.
//!
//! # Persisted layout
//!
//! | Key                | Value                                   |
//! |--------------------|-----------------------------------------|
//! | `draft_submission` | JSON [`SubmissionDraft`](grant_model::SubmissionDraft) |
//! | `draft_step_index` | step index as a decimal string (0..=9)  |
//! | `submission_meta`  | JSON [`SubmissionSummary`]              |
//!
//! # Example
//!
//! ```rust
//! use grant_model::SubmissionDraft;
//! use grant_store::{DraftStore, MemoryStore, StorageKeys};
//! use std::sync::Arc;
//!
//! let store = DraftStore::new(Arc::new(MemoryStore::new()), StorageKeys::default());
//! assert!(store.load_snapshot().is_none());
//!
//! store.save_draft(&SubmissionDraft::seeded()).unwrap();
//! assert_eq!(store.load_snapshot(), Some(SubmissionDraft::seeded()));
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod autosave;
mod draft_store;
mod error;
mod file_store;
mod keys;
mod kv;
mod meta;

pub use autosave::{Autosaver, DEFAULT_QUIET_PERIOD};
pub use draft_store::DraftStore;
pub use error::{StoreError, StoreResult};
pub use file_store::FileStore;
pub use keys::{StorageKeys, DRAFT_KEY, STEP_INDEX_KEY, SUBMISSION_META_KEY};
pub use kv::{KeyValueStore, MemoryStore, SharedStore};
pub use meta::{MetaStore, SubmissionStatus, SubmissionSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
