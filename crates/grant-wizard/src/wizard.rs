//! The wizard aggregate
//!
//! Owns the document and the current step. Every mutation goes through a
//! method here, which revalidates the whole document and hands it to the
//! autosaver. Storage failures during editing are logged and swallowed: the
//! in-memory document stays authoritative and the next change retries.

use crate::attach::read_attachment;
use crate::config::{SubmitMode, WizardConfig};
use crate::dashboard::Route;
use crate::error::{WizardError, WizardResult};
use crate::navigator::StepNavigator;
use crate::restore;
use crate::session::{SessionProvider, StaticSession};
use grant_model::{
    Activity, BudgetLine, DocumentType, FileRef, Risk, Step, SubmissionDraft, WizardState,
};
use grant_rules::{
    file_constraints, missing_required_attachments, DraftValidation, DraftValidator, RuleViolation,
};
use grant_store::{
    Autosaver, DraftStore, MetaStore, SharedStore, StorageKeys, SubmissionStatus, SubmissionSummary,
};
use serde::Serialize;
use std::path::Path;

/// What a successful submit hands back to the navigation shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    /// Summary now visible on the dashboard
    pub summary: SubmissionSummary,
    /// Where to go next
    pub next: Route,
}

/// Ten-step submission wizard
#[derive(Debug)]
pub struct Wizard {
    draft: SubmissionDraft,
    navigator: StepNavigator,
    validator: DraftValidator,
    validation: DraftValidation,
    drafts: DraftStore,
    meta: MetaStore,
    autosaver: Autosaver,
    config: WizardConfig,
}

impl Wizard {
    /// Start the wizard for a single implicit user
    ///
    /// Restores the stored draft and step if there is one, otherwise seeds a
    /// fresh draft. Must be called inside a tokio runtime for debounced
    /// autosave; outside one, changes are written synchronously.
    #[must_use]
    pub fn start(kv: SharedStore, config: WizardConfig) -> Self {
        Self::start_with_session(kv, config, &StaticSession::anonymous())
    }

    /// Start the wizard for the user of `session`
    #[must_use]
    pub fn start_with_session(
        kv: SharedStore,
        config: WizardConfig,
        session: &dyn SessionProvider,
    ) -> Self {
        let keys = config.storage_keys(session);
        Self::start_with_keys(kv, config, keys)
    }

    fn start_with_keys(kv: SharedStore, config: WizardConfig, keys: StorageKeys) -> Self {
        let drafts = DraftStore::new(kv.clone(), keys.clone());
        let meta = MetaStore::new(kv, keys.submission_meta);

        let draft = match drafts.load_snapshot() {
            Some(snapshot) => {
                let draft = restore::rebuild(snapshot);
                tracing::info!(key = %keys.draft, "wizard started from saved draft");
                draft
            }
            None => {
                tracing::info!("wizard started with a fresh draft");
                SubmissionDraft::seeded()
            }
        };
        let navigator = StepNavigator::at(drafts.load_step());

        let validator = DraftValidator::new();
        let validation = validator.validate(&draft);
        let autosaver = Autosaver::spawn(drafts.clone(), config.quiet_period());

        Self {
            draft,
            navigator,
            validator,
            validation,
            drafts,
            meta,
            autosaver,
            config,
        }
    }

    /// Current document
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    /// Copy of the document and current step
    #[must_use]
    pub fn state(&self) -> WizardState {
        WizardState {
            draft: self.draft.clone(),
            current_step: self.navigator.current(),
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Apply an arbitrary edit to the document
    pub fn update<R>(&mut self, edit: impl FnOnce(&mut SubmissionDraft) -> R) -> R {
        let result = edit(&mut self.draft);
        self.changed("update");
        result
    }

    /// Append an activity with no months; returns its index
    pub fn add_activity(&mut self, label: impl Into<String>) -> usize {
        let index = self.draft.activities.append(Activity::unscheduled(label));
        self.changed("add_activity");
        index
    }

    /// Remove the activity at `index`; out of bounds is a no-op
    pub fn remove_activity(&mut self, index: usize) -> bool {
        let removed = self.draft.activities.remove_at(index).is_some();
        if removed {
            self.changed("remove_activity");
        }
        removed
    }

    /// Toggle `month` on the activity at `index`
    pub fn toggle_activity_month(&mut self, index: usize, month: u8) -> bool {
        let toggled = self.draft.activities.toggle_month(index, month);
        if toggled {
            self.changed("toggle_activity_month");
        }
        toggled
    }

    /// Append a risk; returns its index
    pub fn add_risk(&mut self, risk: Risk) -> usize {
        let index = self.draft.risks.append(risk);
        self.changed("add_risk");
        index
    }

    /// Remove the risk at `index`; out of bounds is a no-op
    pub fn remove_risk(&mut self, index: usize) -> bool {
        let removed = self.draft.risks.remove_at(index).is_some();
        if removed {
            self.changed("remove_risk");
        }
        removed
    }

    /// Append a budget line; returns its index
    pub fn add_budget_line(&mut self, line: BudgetLine) -> usize {
        let index = self.draft.budget_lines.append(line);
        self.changed("add_budget_line");
        index
    }

    /// Remove the budget line at `index`; out of bounds is a no-op
    pub fn remove_budget_line(&mut self, index: usize) -> bool {
        let removed = self.draft.budget_lines.remove_at(index).is_some();
        if removed {
            self.changed("remove_budget_line");
        }
        removed
    }

    /// Put `file` in `slot` and return the slot's rule result
    ///
    /// The file is stored even when it breaks a rule, so the failure can be
    /// shown next to it.
    pub fn attach(&mut self, slot: DocumentType, file: FileRef) -> Result<(), RuleViolation> {
        let outcome = file_constraints(Some(&file));
        self.draft.attachments.set(slot, file);
        self.changed("attach");
        outcome
    }

    /// Read `path` and attach it to `slot`
    ///
    /// A read failure leaves every slot untouched.
    pub async fn attach_file(
        &mut self,
        slot: DocumentType,
        path: impl AsRef<Path>,
    ) -> WizardResult<Result<(), RuleViolation>> {
        let file = read_attachment(path.as_ref())
            .await
            .map_err(|source| WizardError::AttachmentRead {
                document: slot,
                source,
            })?;
        Ok(self.attach(slot, file))
    }

    /// Empty `slot`; returns whether it held a file
    pub fn detach(&mut self, slot: DocumentType) -> bool {
        let removed = self.draft.attachments.clear(slot).is_some();
        if removed {
            self.changed("detach");
        }
        removed
    }

    fn changed(&mut self, operation: &'static str) {
        self.validation = self.validator.validate(&self.draft);
        tracing::debug!(
            operation,
            violations = self.validation.len(),
            "draft changed"
        );
        self.autosaver.schedule(&self.draft);
    }

    /// Go to step `index`; out-of-range requests are ignored
    ///
    /// The new index is written at once, without debounce.
    pub fn go_to(&mut self, index: i64) -> bool {
        let moved = self.navigator.go_to(index);
        if moved {
            self.step_changed();
        } else {
            tracing::debug!(index, current = self.navigator.current(), "navigation ignored");
        }
        moved
    }

    /// Go to the next step
    pub fn next(&mut self) -> bool {
        let moved = self.navigator.next();
        if moved {
            self.step_changed();
        }
        moved
    }

    /// Go to the previous step
    pub fn prev(&mut self) -> bool {
        let moved = self.navigator.prev();
        if moved {
            self.step_changed();
        }
        moved
    }

    /// Zero-based current step
    #[inline]
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.navigator.current()
    }

    /// Current step
    #[inline]
    #[must_use]
    pub fn step(&self) -> Step {
        self.navigator.step()
    }

    /// Completion percentage
    #[inline]
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.navigator.progress()
    }

    fn step_changed(&self) {
        let current = self.navigator.current();
        tracing::debug!(step = current, "step changed");
        if let Err(err) = self.drafts.save_step(current) {
            tracing::warn!(error = %err, "could not persist step index");
        }
    }

    /// Validation report for the current document
    #[inline]
    #[must_use]
    pub fn validation(&self) -> &DraftValidation {
        &self.validation
    }

    /// Overhead rule failure, shown apart from field errors
    #[inline]
    #[must_use]
    pub fn budget_error(&self) -> Option<&RuleViolation> {
        self.validation.budget_error()
    }

    /// True when every rule passes
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    /// Required slots still empty
    #[must_use]
    pub fn missing_attachments(&self) -> Vec<DocumentType> {
        missing_required_attachments(&self.draft.attachments)
    }

    /// Record the document as submitted
    ///
    /// In permissive mode every attempt succeeds. In strict mode the attempt
    /// is refused while a rule fails or a required attachment is missing.
    /// On success the pending autosave is dropped, the summary written and
    /// the draft slot cleared. When the summary cannot be written the
    /// current document is scheduled for autosave again and the storage
    /// error is returned.
    pub fn submit(&mut self) -> WizardResult<SubmissionReceipt> {
        if self.config.submit_mode == SubmitMode::Strict {
            let missing = self.missing_attachments();
            if !self.validation.is_valid() || !missing.is_empty() {
                tracing::info!(
                    violations = self.validation.len(),
                    missing = missing.len(),
                    "submission refused"
                );
                return Err(WizardError::SubmissionBlocked {
                    validation: Box::new(self.validation.clone()),
                    missing,
                });
            }
        }

        self.autosaver.discard_pending();
        let summary = SubmissionSummary::new(self.config.project_id.clone(), SubmissionStatus::Submitted)
            .with_title(self.draft.proposal.title.clone());
        if let Err(err) = self.meta.save(&summary) {
            // Nothing was recorded, so the dropped edits must still reach the draft slot.
            self.autosaver.schedule(&self.draft);
            tracing::warn!(error = %err, "submission not recorded, draft kept");
            return Err(err.into());
        }
        self.drafts.clear_draft()?;

        tracing::info!(id = %summary.id, valid = self.validation.is_valid(), "draft submitted");
        Ok(SubmissionReceipt {
            summary,
            next: Route::Dashboard,
        })
    }

    /// Write any pending change now
    pub async fn flush(&self) {
        self.autosaver.flush().await;
    }

    /// Write any pending change and stop the autosave task
    pub async fn shutdown(self) {
        self.autosaver.shutdown().await;
    }
}
