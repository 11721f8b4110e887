//! Error types for the wizard
//!
//! Rule failures are not errors here: they live in the validation report.
//! A [`WizardError`] is returned only for:
//! - Unreadable attachment files
//! - Submissions refused in strict mode
//! - Storage failures while submitting
//! - Bad configuration

use grant_model::DocumentType;
use grant_rules::DraftValidation;
use grant_store::StoreError;
use std::path::PathBuf;

/// Main wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Selected file could not be read; no slot was touched
    #[error("cannot read attachment for {document}: {source}")]
    AttachmentRead {
        /// Slot the file was meant for
        document: DocumentType,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Strict mode refused the submission
    #[error(
        "submission blocked: {} rule(s) failing, {} required attachment(s) missing",
        validation.len(),
        missing.len()
    )]
    SubmissionBlocked {
        /// Validation report at the time of the attempt
        validation: Box<DraftValidation>,
        /// Required slots still empty
        missing: Vec<DocumentType>,
    },

    /// Persisting the submission failed
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Config file could not be read
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// Path given
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`WizardConfig`](crate::WizardConfig)
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl WizardError {
    /// Check if the error is a strict-mode refusal
    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, WizardError::SubmissionBlocked { .. })
    }
}

/// Result alias for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;
