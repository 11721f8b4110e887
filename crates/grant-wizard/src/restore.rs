//! Rebuilding a wizard document from a stored snapshot
//!
//! The snapshot is already a complete, defaulted draft once it decodes, so the
//! rebuilt draft is equal to it. Collections go through `Collection::append`
//! only so restored entries take the same path as entries added while editing;
//! the order of the steps does not matter. Nothing here schedules an autosave:
//! the data just came from the store.

use grant_model::SubmissionDraft;

/// Rebuild a draft from `snapshot`
pub(crate) fn rebuild(snapshot: SubmissionDraft) -> SubmissionDraft {
    let SubmissionDraft {
        applicant,
        proposal,
        objectives,
        activities,
        activities_summary,
        risks,
        budget_lines,
        funding_status,
        sustainability,
        attachments,
    } = snapshot;

    let mut draft = SubmissionDraft::default();
    for activity in activities {
        draft.activities.append(activity);
    }
    for risk in risks {
        draft.risks.append(risk);
    }
    for line in budget_lines {
        draft.budget_lines.append(line);
    }

    draft.applicant = applicant;
    draft.proposal = proposal;
    draft.objectives = objectives;
    draft.activities_summary = activities_summary;
    draft.funding_status = funding_status;
    draft.sustainability = sustainability;
    draft.attachments = attachments;

    tracing::debug!(
        activities = draft.activities.len(),
        risks = draft.risks.len(),
        budget_lines = draft.budget_lines.len(),
        attachments = draft.attachments.len(),
        "draft rebuilt from snapshot"
    );
    draft
}
