//! The submission document
//!
//! One group per wizard step. Every group deserializes with `#[serde(default)]`
//! so an older or partial snapshot patches over defaults instead of failing.

use crate::attachment::Attachments;
use crate::collection::Collection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Project duration a fresh draft starts with
pub const DEFAULT_DURATION_MONTHS: i64 = 12;

/// Full document being built by the wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionDraft {
    /// Step 1: organization identity
    pub applicant: Applicant,
    /// Step 2: proposal
    pub proposal: Proposal,
    /// Step 3: objectives
    pub objectives: Objectives,
    /// Step 4: activity calendar
    pub activities: Collection<Activity>,
    /// Step 4: activities overview
    pub activities_summary: String,
    /// Step 5: risks
    pub risks: Collection<Risk>,
    /// Step 6: budget
    pub budget_lines: Collection<BudgetLine>,
    /// Step 7: stage and funding
    pub funding_status: FundingStatus,
    /// Step 8: sustainability
    pub sustainability: Sustainability,
    /// Step 9: supporting documents
    pub attachments: Attachments,
}

impl SubmissionDraft {
    /// Fresh draft with one seed activity and one seed budget line
    #[must_use]
    pub fn seeded() -> Self {
        let mut draft = Self::default();
        draft.activities.append(Activity::unscheduled("Activity 1"));
        draft.budget_lines.append(BudgetLine::new(
            BudgetCategory::FieldActivities,
            "Kick-off workshop",
            0.0,
        ));
        draft
    }
}

/// Organization identity; free text, nothing enforced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Applicant {
    pub org_name: String,
    pub org_type: String,
    pub contact_person: String,
    pub geo_coverage: String,
    pub domains: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
}

/// Project proposal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Proposal {
    /// At most 120 characters
    pub title: String,
    /// At most 200 words
    pub location_and_target: String,
    /// At most 500 words
    pub context_justification: String,
}

/// Objectives and expected results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Objectives {
    /// At most 200 words
    pub objectives: String,
    /// At most 100 words
    pub expected_results: String,
    /// Between 1 and 48
    pub duration_months: i64,
}

impl Default for Objectives {
    fn default() -> Self {
        Self {
            objectives: String::new(),
            expected_results: String::new(),
            duration_months: DEFAULT_DURATION_MONTHS,
        }
    }
}

/// One line of the activity calendar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub label: String,
    /// Months (1..=12) the activity runs in
    ///
    /// Held wide so a stored out-of-range month loads and is reported by
    /// validation instead of failing the whole snapshot.
    pub months: BTreeSet<i64>,
}

impl Activity {
    /// Create activity with its scheduled months
    #[must_use]
    pub fn new(label: impl Into<String>, months: impl IntoIterator<Item = u8>) -> Self {
        Self {
            label: label.into(),
            months: months.into_iter().map(i64::from).collect(),
        }
    }

    /// Create activity with no month scheduled yet
    #[must_use]
    pub fn unscheduled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            months: BTreeSet::new(),
        }
    }

    /// Add `month` if absent, remove it if present
    ///
    /// Months outside 1..=12 are ignored and return `false`.
    pub fn toggle_month(&mut self, month: u8) -> bool {
        if !(1..=12).contains(&month) {
            return false;
        }
        let month = i64::from(month);
        if !self.months.remove(&month) {
            self.months.insert(month);
        }
        true
    }

    /// Check if the activity runs in `month`
    #[inline]
    #[must_use]
    pub fn runs_in(&self, month: u8) -> bool {
        self.months.contains(&i64::from(month))
    }
}

impl Collection<Activity> {
    /// Toggle `month` on the activity at `index`
    ///
    /// Returns `false` (and changes nothing) when the index is out of bounds
    /// or the month is outside 1..=12.
    pub fn toggle_month(&mut self, index: usize, month: u8) -> bool {
        self.get_mut(index)
            .is_some_and(|activity| activity.toggle_month(month))
    }
}

/// Risk and how it is mitigated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Risk {
    pub description: String,
    pub mitigation: String,
}

impl Risk {
    /// Create risk entry
    #[must_use]
    pub fn new(description: impl Into<String>, mitigation: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            mitigation: mitigation.into(),
        }
    }
}

/// Budget line category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetCategory {
    /// Field work
    #[default]
    FieldActivities,
    /// Equipment and investment
    Investment,
    /// Overhead, capped at 10% of the total
    Operating,
}

/// One budget line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetLine {
    pub category: BudgetCategory,
    pub description: String,
    /// Line total, expected to be non-negative
    pub total: f64,
    /// Share requested from the funder
    pub part_own_fund: f64,
    /// Share covered by co-financing
    pub part_cofinance: f64,
}

impl BudgetLine {
    /// Create line with no split between funder and co-financing
    #[must_use]
    pub fn new(category: BudgetCategory, description: impl Into<String>, total: f64) -> Self {
        Self {
            category,
            description: description.into(),
            total,
            part_own_fund: 0.0,
            part_cofinance: 0.0,
        }
    }

    /// Set the funder / co-financing split
    #[inline]
    #[must_use]
    pub fn with_split(mut self, part_own_fund: f64, part_cofinance: f64) -> Self {
        self.part_own_fund = part_own_fund;
        self.part_cofinance = part_cofinance;
        self
    }

    /// True when every amount is a finite number
    ///
    /// JSON has no encoding for NaN or infinity.
    #[inline]
    #[must_use]
    pub fn has_finite_amounts(&self) -> bool {
        [self.total, self.part_own_fund, self.part_cofinance]
            .iter()
            .all(|amount| amount.is_finite())
    }
}

/// Project maturity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStage {
    #[default]
    Conception,
    Startup,
    Advanced,
    FinalPhase,
}

/// Project stage and funding already requested or obtained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingStatus {
    pub stage: ProjectStage,
    pub has_funding: bool,
    pub funding_details: String,
}

/// Sustainability and replicability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sustainability {
    /// At most 250 words
    pub sustainability: String,
    /// At most 250 words
    pub replicability: String,
}

/// Document plus the step the user is on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub draft: SubmissionDraft,
    /// Always within `0..STEP_COUNT`
    pub current_step: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draft_has_one_activity_and_budget_line() {
        let draft = SubmissionDraft::seeded();
        assert_eq!(draft.activities.len(), 1);
        assert_eq!(draft.activities[0].label, "Activity 1");
        assert_eq!(draft.budget_lines.len(), 1);
        assert_eq!(draft.budget_lines[0].category, BudgetCategory::FieldActivities);
        assert!(draft.risks.is_empty());
        assert_eq!(draft.objectives.duration_months, 12);
    }

    #[test]
    fn toggle_month_adds_then_removes() {
        let mut activity = Activity::new("Planting", [2]);
        assert!(activity.toggle_month(5));
        assert!(activity.runs_in(5));
        assert!(activity.toggle_month(5));
        assert!(!activity.runs_in(5));
        assert!(activity.runs_in(2));
    }

    #[test]
    fn toggle_month_ignores_out_of_range() {
        let mut activity = Activity::unscheduled("Planting");
        assert!(!activity.toggle_month(0));
        assert!(!activity.toggle_month(13));
        assert!(activity.months.is_empty());
    }

    #[test]
    fn collection_toggle_out_of_bounds_is_noop() {
        let mut draft = SubmissionDraft::seeded();
        assert!(!draft.activities.toggle_month(4, 1));
        assert!(draft.activities.toggle_month(0, 1));
        assert!(draft.activities[0].runs_in(1));
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let draft = SubmissionDraft::seeded();
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("budgetLines").is_some());
        assert!(json.get("activitiesSummary").is_some());
        assert_eq!(json["budgetLines"][0]["category"], "FIELD_ACTIVITIES");
        assert_eq!(json["fundingStatus"]["stage"], "CONCEPTION");
    }

    #[test]
    fn partial_snapshot_keeps_defaults() {
        let draft: SubmissionDraft =
            serde_json::from_str(r#"{"proposal":{"title":"Mangroves"}}"#).unwrap();
        assert_eq!(draft.proposal.title, "Mangroves");
        assert_eq!(draft.objectives.duration_months, DEFAULT_DURATION_MONTHS);
        assert!(draft.activities.is_empty());
    }

    #[test]
    fn out_of_range_months_still_load() {
        let draft: SubmissionDraft = serde_json::from_str(
            r#"{"proposal":{"title":"Mangroves"},"activities":[{"label":"Survey","months":[-1,3,300]}]}"#,
        )
        .unwrap();
        assert_eq!(draft.proposal.title, "Mangroves");
        assert!(draft.activities[0].runs_in(3));
        assert!(draft.activities[0].months.contains(&300));
    }
}
