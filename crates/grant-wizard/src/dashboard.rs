//! Dashboard collaborator and routing signal
//!
//! The dashboard reads and creates the submission summary. It never writes
//! the draft slot; that belongs to the wizard.

use crate::config::WizardConfig;
use crate::session::SessionProvider;
use grant_store::{DraftStore, MetaStore, SharedStore, SubmissionStatus, SubmissionSummary};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Where the navigation shell should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Dashboard,
    /// The wizard itself
    Form,
}

impl Route {
    /// URL path of the route
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Form => "/form",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Project status view over the shared store
#[derive(Debug, Clone)]
pub struct ProjectDashboard {
    meta: MetaStore,
    drafts: DraftStore,
    session: Arc<dyn SessionProvider>,
    project_id: String,
}

impl ProjectDashboard {
    /// Create dashboard over `kv`, using the same keys the wizard would
    #[must_use]
    pub fn new(kv: SharedStore, config: &WizardConfig, session: Arc<dyn SessionProvider>) -> Self {
        let keys = config.storage_keys(session.as_ref());
        Self {
            meta: MetaStore::new(kv.clone(), keys.submission_meta.clone()),
            drafts: DraftStore::new(kv, keys),
            session,
            project_id: config.project_id.clone(),
        }
    }

    /// Where a visitor lands
    #[must_use]
    pub fn landing(&self) -> Route {
        if self.session.is_signed_in() {
            Route::Dashboard
        } else {
            Route::Login
        }
    }

    /// Current project summary, if any
    #[must_use]
    pub fn summary(&self) -> Option<SubmissionSummary> {
        self.meta.load()
    }

    /// Check if a project exists
    #[must_use]
    pub fn has_project(&self) -> bool {
        self.summary().is_some()
    }

    /// Check if the project is still being edited
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.summary()
            .is_some_and(|s| s.status == SubmissionStatus::Draft)
    }

    /// Check if an unsent draft snapshot exists
    #[must_use]
    pub fn has_saved_draft(&self) -> bool {
        self.drafts.load_snapshot().is_some()
    }

    /// Create the project if none exists, then open the form
    ///
    /// A storage failure is logged; the user still reaches the form, where
    /// autosave keeps retrying.
    pub fn start_project(&self) -> Route {
        if !self.session.is_signed_in() {
            return Route::Login;
        }
        if !self.has_project() {
            let summary = SubmissionSummary::new(self.project_id.clone(), SubmissionStatus::Draft);
            match self.meta.save(&summary) {
                Ok(()) => tracing::info!(id = %summary.id, "project started"),
                Err(err) => tracing::warn!(error = %err, "could not record new project"),
            }
        }
        Route::Form
    }

    /// Reopen the form on an existing project
    #[must_use]
    pub fn resume(&self) -> Route {
        if self.session.is_signed_in() {
            Route::Form
        } else {
            Route::Login
        }
    }
}
