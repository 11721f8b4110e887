//! Step navigation
//!
//! Out-of-range requests are ignored rather than rejected, so late or
//! repeated UI events can never push the wizard off its ten steps.

use grant_model::{Step, STEP_COUNT};

/// Bounds-checked current step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepNavigator {
    current: usize,
}

impl StepNavigator {
    /// Navigator on the first step
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator on `index`, clamped to the last step
    #[inline]
    #[must_use]
    pub fn at(index: usize) -> Self {
        Self {
            current: index.min(STEP_COUNT - 1),
        }
    }

    /// Zero-based current step
    #[inline]
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Current step
    #[must_use]
    pub fn step(&self) -> Step {
        Step::from_index(self.current).unwrap_or(Step::Applicant)
    }

    /// Move to `index` if it is a valid step; returns whether it moved
    ///
    /// Going to the step already current counts as a move.
    pub fn go_to(&mut self, index: i64) -> bool {
        match usize::try_from(index) {
            Ok(target) if target < STEP_COUNT => {
                self.current = target;
                true
            }
            _ => false,
        }
    }

    /// Move forward one step
    pub fn next(&mut self) -> bool {
        self.go_to(self.offset(1))
    }

    /// Move back one step
    pub fn prev(&mut self) -> bool {
        self.go_to(self.offset(-1))
    }

    /// Completion percentage shown to the user, rounded
    #[must_use]
    pub fn progress(&self) -> u8 {
        let percent = ((self.current + 1) * 100 + STEP_COUNT / 2) / STEP_COUNT;
        u8::try_from(percent).unwrap_or(100)
    }

    /// True on the first step
    #[inline]
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    /// True on the review step
    #[inline]
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == STEP_COUNT - 1
    }

    fn offset(&self, delta: i64) -> i64 {
        i64::try_from(self.current).unwrap_or(0) + delta
    }
}
