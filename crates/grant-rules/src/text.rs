//! Scalar and collection-size rules

use crate::violation::RuleViolation;
use grant_model::Collection;

/// Count whitespace-delimited words in trimmed text
///
/// Empty or whitespace-only text has zero words.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Fails when `text` has more than `max` words
pub fn word_limit(text: &str, max: usize) -> Result<(), RuleViolation> {
    let actual = word_count(text);
    if actual > max {
        return Err(RuleViolation::WordLimitExceeded { max, actual });
    }
    Ok(())
}

/// Fails when `text` has more than `max` characters
pub fn max_length(text: &str, max: usize) -> Result<(), RuleViolation> {
    let actual = text.chars().count();
    if actual > max {
        return Err(RuleViolation::MaxLengthExceeded { max, actual });
    }
    Ok(())
}

/// Fails when `value` is outside `min..=max`
pub fn in_range(value: i64, min: i64, max: i64) -> Result<(), RuleViolation> {
    if !(min..=max).contains(&value) {
        return Err(RuleViolation::OutOfRange {
            min,
            max,
            actual: value,
        });
    }
    Ok(())
}

/// Fails when the collection holds fewer than `min` records
pub fn non_empty_collection<T>(collection: &Collection<T>, min: usize) -> Result<(), RuleViolation> {
    if collection.len() < min {
        return Err(RuleViolation::CollectionTooShort { min });
    }
    Ok(())
}

/// Fails on the first month outside 1..=12
pub fn valid_months<'a>(months: impl IntoIterator<Item = &'a i64>) -> Result<(), RuleViolation> {
    match months.into_iter().find(|m| !(1..=12).contains(*m)) {
        Some(&month) => Err(RuleViolation::InvalidMonth { month }),
        None => Ok(()),
    }
}
