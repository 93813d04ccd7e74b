//! The nine derived money fields shared by lines, sections and projects.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use costplan_shared::types::Cents;
use serde::{Deserialize, Serialize};

/// Calculated money fields, all in cents.
///
/// Identities that hold for every line and therefore every sum of lines:
/// `final_forecast = approved_contract + forecast_variations + approved_variations`,
/// `variance = budget - final_forecast`, `etc = final_forecast - claimed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostFigures {
    /// Budget.
    pub budget_cents: Cents,
    /// Sum of contract allocations.
    pub approved_contract_cents: Cents,
    /// Variations still at forecast status.
    pub forecast_variations_cents: Cents,
    /// Approved variations.
    pub approved_variations_cents: Cents,
    /// Contract plus all live variations.
    pub final_forecast_cents: Cents,
    /// Budget less final forecast; positive means under budget.
    pub variance_cents: Cents,
    /// Invoiced up to and including the reporting period.
    pub claimed_cents: Cents,
    /// Invoiced in the reporting period.
    pub current_month_cents: Cents,
    /// Estimate to complete.
    pub etc_cents: Cents,
}

impl Add for CostFigures {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for CostFigures {
    fn add_assign(&mut self, rhs: Self) {
        self.budget_cents += rhs.budget_cents;
        self.approved_contract_cents += rhs.approved_contract_cents;
        self.forecast_variations_cents += rhs.forecast_variations_cents;
        self.approved_variations_cents += rhs.approved_variations_cents;
        self.final_forecast_cents += rhs.final_forecast_cents;
        self.variance_cents += rhs.variance_cents;
        self.claimed_cents += rhs.claimed_cents;
        self.current_month_cents += rhs.current_month_cents;
        self.etc_cents += rhs.etc_cents;
    }
}

impl Sum for CostFigures {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a CostFigures> for CostFigures {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
