//! Grant Submission Model
//!
//! Typed document model for the ten-step grant application wizard.
//!
//! # Core Concepts
//!
//! - [`SubmissionDraft`]: The full document being built, one group per step
//! - [`Collection<T>`]: Append/remove-only ordered records (activities, risks, budget lines)
//! - [`Step`]: The ten wizard steps, in order
//! - [`FileRef`]: Attachment value decoupled from any file picker
//! - [`FieldPath`]: Dotted address of a field inside the document
//!
//! # Example
//!
//! ```rust
//! use grant_model::{Activity, SubmissionDraft};
//!
//! let mut draft = SubmissionDraft::seeded();
//! let index = draft.activities.append(Activity::new("Riverbank survey", [4, 5]));
//! assert!(draft.activities.toggle_month(index, 3));
//! assert_eq!(draft.activities.len(), 2);
//! ```

#![warn(unreachable_pub)]

mod attachment;
mod collection;
mod draft;
mod path;
mod step;

pub use attachment::{mime, mime_for_extension, Attachments, DocumentType, FileRef, UnknownDocumentType};
pub use collection::Collection;
pub use draft::{
    Activity, Applicant, BudgetCategory, BudgetLine, FundingStatus, Objectives, ProjectStage,
    Proposal, Risk, SubmissionDraft, Sustainability, WizardState, DEFAULT_DURATION_MONTHS,
};
pub use path::FieldPath;
pub use step::{Step, STEP_COUNT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
