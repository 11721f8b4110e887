//! Document-level validation
//!
//! [`DraftValidator`] runs every rule of every step over a draft and returns a
//! [`DraftValidation`]. It is recomputed from scratch after each mutation, so
//! there is nothing to invalidate.

use crate::budget::{budget_overhead_cap, non_negative};
use crate::file::file_constraints;
use crate::text::{in_range, max_length, non_empty_collection, valid_months, word_limit};
use crate::violation::RuleViolation;
use grant_model::{DocumentType, FieldPath, Step, SubmissionDraft};
use serde::Serialize;

/// Proposal title limit, in characters
const TITLE_MAX_CHARS: usize = 120;
/// Word limits per text field
const LOCATION_MAX_WORDS: usize = 200;
const CONTEXT_MAX_WORDS: usize = 500;
const OBJECTIVES_MAX_WORDS: usize = 200;
const RESULTS_MAX_WORDS: usize = 100;
const ACTIVITIES_SUMMARY_MAX_WORDS: usize = 200;
const SUSTAINABILITY_MAX_WORDS: usize = 250;
/// Allowed project duration, in months
const DURATION_MONTHS: (i64, i64) = (1, 48);

/// One failed rule, located in the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    /// Step the field belongs to
    pub step: Step,
    /// Field (or record) that failed
    pub field: FieldPath,
    /// What failed
    pub violation: RuleViolation,
}

/// Result of validating a whole draft
///
/// The budget overhead rule spans every budget line, so its failure is kept
/// apart from per-field failures and read through [`budget_error`](Self::budget_error).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftValidation {
    field_violations: Vec<FieldViolation>,
    budget_error: Option<RuleViolation>,
}

impl DraftValidation {
    /// True when no rule failed
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.field_violations.is_empty() && self.budget_error.is_none()
    }

    /// Cross-step overhead failure, if any
    #[inline]
    #[must_use]
    pub fn budget_error(&self) -> Option<&RuleViolation> {
        self.budget_error.as_ref()
    }

    /// Every per-field failure, in step order
    #[inline]
    #[must_use]
    pub fn field_violations(&self) -> &[FieldViolation] {
        &self.field_violations
    }

    /// Per-field failures of one step
    pub fn for_step(&self, step: Step) -> impl Iterator<Item = &FieldViolation> {
        self.field_violations.iter().filter(move |v| v.step == step)
    }

    /// Failure of exactly `field`, if any
    #[must_use]
    pub fn for_field(&self, field: &FieldPath) -> Option<&RuleViolation> {
        self.field_violations
            .iter()
            .find(|v| &v.field == field)
            .map(|v| &v.violation)
    }

    /// True when the step has no failure, counting the overhead rule for the budget step
    #[must_use]
    pub fn is_step_valid(&self, step: Step) -> bool {
        let budget_ok = step != Step::Budget || self.budget_error.is_none();
        budget_ok && self.for_step(step).next().is_none()
    }

    /// Number of failures, overhead included
    #[must_use]
    pub fn len(&self) -> usize {
        self.field_violations.len() + usize::from(self.budget_error.is_some())
    }

    /// Same as [`is_valid`](Self::is_valid)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_valid()
    }
}

/// Runs every rule over a draft
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftValidator;

impl DraftValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate every step of `draft`
    #[must_use]
    pub fn validate(&self, draft: &SubmissionDraft) -> DraftValidation {
        let mut report = Collector::default();

        let proposal = FieldPath::single("proposal");
        report.check(
            Step::Proposal,
            proposal.child("title"),
            max_length(&draft.proposal.title, TITLE_MAX_CHARS),
        );
        report.check(
            Step::Proposal,
            proposal.child("locationAndTarget"),
            word_limit(&draft.proposal.location_and_target, LOCATION_MAX_WORDS),
        );
        report.check(
            Step::Proposal,
            proposal.child("contextJustification"),
            word_limit(&draft.proposal.context_justification, CONTEXT_MAX_WORDS),
        );

        let objectives = FieldPath::single("objectives");
        report.check(
            Step::Objectives,
            objectives.child("objectives"),
            word_limit(&draft.objectives.objectives, OBJECTIVES_MAX_WORDS),
        );
        report.check(
            Step::Objectives,
            objectives.child("expectedResults"),
            word_limit(&draft.objectives.expected_results, RESULTS_MAX_WORDS),
        );
        report.check(
            Step::Objectives,
            objectives.child("durationMonths"),
            in_range(draft.objectives.duration_months, DURATION_MONTHS.0, DURATION_MONTHS.1),
        );

        let activities = FieldPath::single("activities");
        report.check(
            Step::Activities,
            activities.clone(),
            non_empty_collection(&draft.activities, 1),
        );
        for (i, activity) in draft.activities.iter().enumerate() {
            report.check(
                Step::Activities,
                activities.index(i).child("months"),
                valid_months(&activity.months),
            );
        }
        report.check(
            Step::Activities,
            FieldPath::single("activitiesSummary"),
            word_limit(&draft.activities_summary, ACTIVITIES_SUMMARY_MAX_WORDS),
        );

        let budget = FieldPath::single("budgetLines");
        report.check(
            Step::Budget,
            budget.clone(),
            non_empty_collection(&draft.budget_lines, 1),
        );
        for (i, line) in draft.budget_lines.iter().enumerate() {
            let path = budget.index(i);
            report.check(Step::Budget, path.child("total"), non_negative(line.total));
            report.check(Step::Budget, path.child("partOwnFund"), non_negative(line.part_own_fund));
            report.check(Step::Budget, path.child("partCofinance"), non_negative(line.part_cofinance));
        }

        let sustainability = FieldPath::single("sustainability");
        report.check(
            Step::Sustainability,
            sustainability.child("sustainability"),
            word_limit(&draft.sustainability.sustainability, SUSTAINABILITY_MAX_WORDS),
        );
        report.check(
            Step::Sustainability,
            sustainability.child("replicability"),
            word_limit(&draft.sustainability.replicability, SUSTAINABILITY_MAX_WORDS),
        );

        let attachments = FieldPath::single("attachments");
        for slot in DocumentType::ALL {
            report.check(
                Step::Attachments,
                attachments.child(slot.tag()),
                file_constraints(draft.attachments.get(slot)),
            );
        }

        DraftValidation {
            field_violations: report.violations,
            budget_error: budget_overhead_cap(&draft.budget_lines).err(),
        }
    }
}

#[derive(Default)]
struct Collector {
    violations: Vec<FieldViolation>,
}

impl Collector {
    fn check(&mut self, step: Step, field: FieldPath, outcome: Result<(), RuleViolation>) {
        if let Err(violation) = outcome {
            self.violations.push(FieldViolation {
                step,
                field,
                violation,
            });
        }
    }
}
