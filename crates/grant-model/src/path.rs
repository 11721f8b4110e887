//! Field paths for addressing within a draft
//!
//! Provides [`FieldPath`] so validation results can point at the exact field
//! (or collection record) they concern.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path to a field inside a [`SubmissionDraft`](crate::SubmissionDraft)
///
/// Segments use the persisted (camelCase) field names; collection records are
/// addressed by their index.
///
/// # Examples
/// - `["proposal", "title"]` → `proposal.title`
/// - `["activities", "0", "months"]` → `activities.0.months`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Create path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Create path from a single segment
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Append a segment
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a collection index
    #[inline]
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Top-level group the path belongs to
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Check if `self` is `other` or lies below it
    #[must_use]
    pub fn starts_with(&self, other: &FieldPath) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }
}

impl serde::Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_segments() {
        let path = FieldPath::single("activities").index(2).child("months");
        assert_eq!(path.to_string(), "activities.2.months");
    }

    #[test]
    fn parse_round_trips_display() {
        let path: FieldPath = "proposal.title".parse().unwrap();
        assert_eq!(path.segments(), &["proposal", "title"]);
        assert_eq!(path.root(), Some("proposal"));
    }

    #[test]
    fn starts_with_matches_prefix() {
        let parent = FieldPath::single("budgetLines");
        let child = parent.index(0).child("total");
        assert!(child.starts_with(&parent));
        assert!(!parent.starts_with(&child));
    }
}
