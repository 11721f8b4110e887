//! Wizard steps

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Number of wizard steps
pub const STEP_COUNT: usize = 10;

/// One of the ten sequential wizard sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    /// Organization identity and contact details
    Applicant,
    /// Title, location/target and context
    Proposal,
    /// Objectives, expected results, duration
    Objectives,
    /// Activity calendar and summary
    Activities,
    /// Risks and mitigations
    Risks,
    /// Budget lines
    Budget,
    /// Project stage and existing funding
    FundingStatus,
    /// Sustainability and replicability
    Sustainability,
    /// Supporting documents
    Attachments,
    /// Read-only recap before submission
    Review,
}

impl Step {
    /// All steps in wizard order
    pub const ALL: [Step; STEP_COUNT] = [
        Step::Applicant,
        Step::Proposal,
        Step::Objectives,
        Step::Activities,
        Step::Risks,
        Step::Budget,
        Step::FundingStatus,
        Step::Sustainability,
        Step::Attachments,
        Step::Review,
    ];

    /// Zero-based position in the wizard
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Step at a zero-based position
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Step::Applicant => "Applicant",
            Step::Proposal => "Project proposal",
            Step::Objectives => "Objectives & results",
            Step::Activities => "Activities & calendar",
            Step::Risks => "Risks",
            Step::Budget => "Estimated budget",
            Step::FundingStatus => "Stage & funding",
            Step::Sustainability => "Sustainability & replication",
            Step::Attachments => "Attachments",
            Step::Review => "Review",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
