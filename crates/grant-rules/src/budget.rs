//! Budget rules
//!
//! The overhead cap is a function of the whole budget, not of a single line:
//! operating lines may not exceed [`OVERHEAD_RATIO`] of the total.

use crate::violation::RuleViolation;
use grant_model::{BudgetCategory, BudgetLine, Collection};
use serde::Serialize;

/// Largest share of the total budget operating lines may take
pub const OVERHEAD_RATIO: f64 = 0.10;

/// Sums over the budget lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetTotals {
    /// Sum of every line total
    pub total: f64,
    /// Sum of the totals of operating lines
    pub operating: f64,
}

impl BudgetTotals {
    /// Sum the lines
    #[must_use]
    pub fn compute<'a>(lines: impl IntoIterator<Item = &'a BudgetLine>) -> Self {
        lines.into_iter().fold(Self::default(), |mut acc, line| {
            acc.total += line.total;
            if line.category == BudgetCategory::Operating {
                acc.operating += line.total;
            }
            acc
        })
    }

    /// Operating share of the total, `None` when the total is not positive
    #[must_use]
    pub fn overhead_share(&self) -> Option<f64> {
        (self.total > 0.0).then(|| self.operating / self.total)
    }
}

/// Fails iff `total > 0` and `operating > 10% × total`
///
/// A zero total satisfies the rule whatever the categories are.
pub fn budget_overhead_cap(lines: &Collection<BudgetLine>) -> Result<(), RuleViolation> {
    let BudgetTotals { total, operating } = BudgetTotals::compute(lines);
    if total > 0.0 && operating > OVERHEAD_RATIO * total {
        return Err(RuleViolation::OverheadTooHigh { operating, total });
    }
    Ok(())
}

/// Fails when `amount` is NaN, infinite or below zero
pub fn non_negative(amount: f64) -> Result<(), RuleViolation> {
    if !amount.is_finite() {
        return Err(RuleViolation::NonFiniteAmount { amount });
    }
    if amount < 0.0 {
        return Err(RuleViolation::NegativeAmount { amount });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(entries: &[(BudgetCategory, f64)]) -> Collection<BudgetLine> {
        entries
            .iter()
            .map(|(category, total)| BudgetLine::new(*category, "", *total))
            .collect()
    }

    #[test]
    fn overhead_within_cap_passes() {
        let budget = lines(&[
            (BudgetCategory::FieldActivities, 100.0),
            (BudgetCategory::Operating, 10.0),
            (BudgetCategory::Investment, 0.0),
        ]);
        assert_eq!(budget_overhead_cap(&budget), Ok(()));
    }

    #[test]
    fn overhead_above_cap_fails() {
        let budget = lines(&[
            (BudgetCategory::FieldActivities, 80.0),
            (BudgetCategory::Operating, 30.0),
        ]);
        assert_eq!(
            budget_overhead_cap(&budget),
            Err(RuleViolation::OverheadTooHigh {
                operating: 30.0,
                total: 110.0
            })
        );
    }

    #[test]
    fn zero_total_is_vacuous() {
        let budget = lines(&[
            (BudgetCategory::Operating, 0.0),
            (BudgetCategory::Operating, 0.0),
        ]);
        assert_eq!(budget_overhead_cap(&budget), Ok(()));
    }

    #[test]
    fn only_operating_lines_fail() {
        let budget = lines(&[(BudgetCategory::Operating, 5.0)]);
        assert!(budget_overhead_cap(&budget).is_err());
    }

    #[test]
    fn totals_and_share() {
        let budget = lines(&[
            (BudgetCategory::Investment, 90.0),
            (BudgetCategory::Operating, 10.0),
        ]);
        let totals = BudgetTotals::compute(&budget);
        assert_eq!(totals.total, 100.0);
        assert_eq!(totals.operating, 10.0);
        assert_eq!(totals.overhead_share(), Some(0.1));
        assert_eq!(BudgetTotals::default().overhead_share(), None);
    }

    #[test]
    fn negative_amount() {
        assert!(non_negative(0.0).is_ok());
        assert_eq!(
            non_negative(-1.5),
            Err(RuleViolation::NegativeAmount { amount: -1.5 })
        );
    }

    #[test]
    fn non_finite_amount() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                non_negative(amount),
                Err(RuleViolation::NonFiniteAmount { .. })
            ));
        }
    }
}
