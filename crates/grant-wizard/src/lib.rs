//! Grant Wizard
//!
//! The ten-step grant application wizard: document state, navigation,
//! validation on every change, debounced autosave and the submit transition.
//!
//! The wizard:
//! - Restores the saved draft and step on start, or seeds a fresh draft
//! - Revalidates the whole document after every edit
//! - Hands every change to a debounced [`Autosaver`](grant_store::Autosaver)
//! - Writes the step index at once on navigation
//! - Records the submission for the [`ProjectDashboard`]
//!
//! # Example
//!
//! ```rust
//! use grant_store::MemoryStore;
//! use grant_wizard::{Route, Wizard, WizardConfig};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = WizardConfig::new().with_quiet_period(Duration::ZERO);
//! let mut wizard = Wizard::start(Arc::new(MemoryStore::new()), config);
//!
//! wizard.update(|draft| draft.proposal.title = "Community seed bank".into());
//! wizard.toggle_activity_month(0, 3);
//! assert!(wizard.next());
//! assert_eq!(wizard.progress(), 20);
//!
//! let receipt = wizard.submit().unwrap();
//! assert_eq!(receipt.next, Route::Dashboard);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod attach;
mod config;
mod dashboard;
mod error;
mod navigator;
mod restore;
mod session;
mod wizard;

pub use attach::read_attachment;
pub use config::{SubmitMode, WizardConfig, DEFAULT_PROJECT_ID};
pub use dashboard::{ProjectDashboard, Route};
pub use error::{WizardError, WizardResult};
pub use navigator::StepNavigator;
pub use session::{SessionProvider, StaticSession, UserIdentity};
pub use wizard::{SubmissionReceipt, Wizard};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the wizard
    pub use crate::{
        ProjectDashboard, Route, SubmitMode, Wizard, WizardConfig, WizardError, WizardResult,
    };
    pub use grant_model::{DocumentType, Step, SubmissionDraft};
    pub use grant_rules::{DraftValidation, RuleViolation};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
