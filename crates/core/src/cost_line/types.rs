//! Calculated cost line types.

use costplan_shared::types::CostLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cost_plan::{CostFigures, Section};
use crate::currency::budget_used_percent;

/// A cost line with its derived figures for one reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedCostLine {
    /// Source cost line.
    pub cost_line_id: CostLineId,
    /// Section of the source line.
    pub section: Section,
    /// Cost code of the source line.
    pub cost_code: String,
    /// Description of the source line.
    pub activity: String,
    /// Position within the section.
    pub sort_order: i32,
    /// Derived figures.
    #[serde(flatten)]
    pub figures: CostFigures,
}

impl CalculatedCostLine {
    /// Share of the final forecast already claimed, in percent.
    #[must_use]
    pub fn claimed_percent(&self) -> Decimal {
        budget_used_percent(self.figures.claimed_cents, self.figures.final_forecast_cents)
    }
}
