//! Grant Submission Rules
//!
//! Pure, side-effect-free predicates over draft values, and the document-level
//! pass that runs them all.
//!
//! # Overview
//!
//! - **Field rules**: [`word_limit`], [`max_length`], [`in_range`], [`non_negative`]
//! - **Collection rules**: [`non_empty_collection`], [`valid_months`]
//! - **Attachment rules**: [`file_constraints`], [`missing_required_attachments`]
//! - **Cross-step rule**: [`budget_overhead_cap`]
//! - **Document pass**: [`DraftValidator`] producing a [`DraftValidation`]
//!
//! Every rule returns `Ok(())` or a [`RuleViolation`]; nothing here mutates
//! state or touches storage.
//!
//! # Example
//!
//! ```rust
//! use grant_model::SubmissionDraft;
//! use grant_rules::{word_limit, DraftValidator, RuleViolation};
//!
//! assert_eq!(
//!     word_limit("one two three", 2),
//!     Err(RuleViolation::WordLimitExceeded { max: 2, actual: 3 })
//! );
//!
//! let report = DraftValidator::new().validate(&SubmissionDraft::seeded());
//! assert!(report.is_valid());
//! ```

#![warn(missing_docs)]

mod budget;
mod file;
mod report;
mod text;
mod violation;

pub use budget::{budget_overhead_cap, non_negative, BudgetTotals, OVERHEAD_RATIO};
pub use file::{
    file_constraints, is_allowed_mime, missing_required_attachments, ALLOWED_MIME_TYPES,
    MAX_ATTACHMENT_BYTES,
};
pub use report::{DraftValidation, DraftValidator, FieldViolation};
pub use text::{in_range, max_length, non_empty_collection, valid_months, word_count, word_limit};
pub use violation::RuleViolation;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for validating drafts
    pub use crate::{DraftValidation, DraftValidator, FieldViolation, RuleViolation};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
