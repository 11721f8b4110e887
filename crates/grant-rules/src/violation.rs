//! Rule failures
//!
//! Field- and record-scoped, always recoverable. They are rendered as inline
//! messages and only ever block a strict submission.

use serde::Serialize;

/// A failed rule, with the numbers needed to explain it
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleViolation {
    /// Text has more whitespace-delimited words than allowed
    #[error("{actual} words exceeds the limit of {max}")]
    WordLimitExceeded { max: usize, actual: usize },

    /// Text has more characters than allowed
    #[error("{actual} characters exceeds the limit of {max}")]
    MaxLengthExceeded { max: usize, actual: usize },

    /// Integer outside its inclusive range
    #[error("{actual} is outside the range {min}..={max}")]
    OutOfRange { min: i64, max: i64, actual: i64 },

    /// Calendar month outside 1..=12
    #[error("month {month} is not between 1 and 12")]
    InvalidMonth { month: i64 },

    /// Budget amount below zero
    #[error("amount {amount} is negative")]
    NegativeAmount { amount: f64 },

    /// Budget amount is NaN or infinite
    #[error("amount {amount} is not a finite number")]
    NonFiniteAmount { amount: f64 },

    /// Operating lines exceed 10% of the total budget
    #[error("operating costs {operating} exceed 10% of the total budget {total}")]
    OverheadTooHigh { operating: f64, total: f64 },

    /// Attachment larger than the size cap
    #[error("file is {size} bytes, above the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },

    /// Attachment mime type not in the allow-list
    #[error("file type '{mime}' is not accepted")]
    UnsupportedFileType { mime: String },

    /// Repeating group has fewer entries than required
    #[error("at least {min} entries are required")]
    CollectionTooShort { min: usize },
}

impl RuleViolation {
    /// Stable machine-readable name, matching the serialized `kind`
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WordLimitExceeded { .. } => "wordLimitExceeded",
            Self::MaxLengthExceeded { .. } => "maxLengthExceeded",
            Self::OutOfRange { .. } => "outOfRange",
            Self::InvalidMonth { .. } => "invalidMonth",
            Self::NegativeAmount { .. } => "negativeAmount",
            Self::NonFiniteAmount { .. } => "nonFiniteAmount",
            Self::OverheadTooHigh { .. } => "overheadTooHigh",
            Self::FileTooLarge { .. } => "fileTooLarge",
            Self::UnsupportedFileType { .. } => "unsupportedFileType",
            Self::CollectionTooShort { .. } => "collectionTooShort",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_limit_display() {
        let v = RuleViolation::WordLimitExceeded { max: 200, actual: 201 };
        assert_eq!(v.to_string(), "201 words exceeds the limit of 200");
    }

    #[test]
    fn serialized_kind_matches_kind() {
        let v = RuleViolation::OverheadTooHigh {
            operating: 30.0,
            total: 110.0,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], v.kind());
        assert_eq!(json["operating"], 30.0);
    }
}
