//! Current totals versus a saved baseline.

use costplan_shared::types::{Cents, CostLineId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::Snapshot;
use crate::cost_plan::{CostFigures, CostPlanTotals, Section};
use crate::currency::ROUNDING;

/// Which way a figure moved since the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceDirection {
    /// Current is above baseline.
    Increase,
    /// Current is below baseline.
    Decrease,
    /// No change.
    Unchanged,
}

impl VarianceDirection {
    /// Direction of a signed difference.
    #[must_use]
    pub const fn of(difference: Cents) -> Self {
        if difference > 0 {
            Self::Increase
        } else if difference < 0 {
            Self::Decrease
        } else {
            Self::Unchanged
        }
    }
}

/// A compared figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparedField {
    /// Budget.
    Budget,
    /// Final forecast.
    Forecast,
    /// Budget less final forecast.
    Variance,
    /// Claimed to date.
    Claimed,
    /// Estimate to complete.
    Etc,
}

impl ComparedField {
    /// Fields compared at project level.
    pub const TOTALS: [Self; 5] = [
        Self::Budget,
        Self::Forecast,
        Self::Variance,
        Self::Claimed,
        Self::Etc,
    ];

    /// Fields compared per section.
    pub const SECTION: [Self; 3] = [Self::Budget, Self::Forecast, Self::Variance];

    /// Reads this field from `figures`.
    #[must_use]
    pub const fn read(self, figures: &CostFigures) -> Cents {
        match self {
            Self::Budget => figures.budget_cents,
            Self::Forecast => figures.final_forecast_cents,
            Self::Variance => figures.variance_cents,
            Self::Claimed => figures.claimed_cents,
            Self::Etc => figures.etc_cents,
        }
    }
}

/// Movement of one figure between baseline and current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVariance {
    /// Field compared.
    pub field: ComparedField,
    /// Value in the snapshot.
    pub baseline_cents: Cents,
    /// Value now.
    pub current_cents: Cents,
    /// `current - baseline`.
    pub difference_cents: Cents,
    /// Difference as a percentage of the absolute baseline, 2 dp.
    pub percent_change: Decimal,
    /// Sign of the difference.
    pub direction: VarianceDirection,
}

impl FieldVariance {
    /// Compares two values of `field`.
    #[must_use]
    pub fn between(field: ComparedField, baseline_cents: Cents, current_cents: Cents) -> Self {
        let difference_cents = current_cents - baseline_cents;
        Self {
            field,
            baseline_cents,
            current_cents,
            difference_cents,
            percent_change: percent_change(baseline_cents, current_cents, difference_cents),
            direction: VarianceDirection::of(difference_cents),
        }
    }
}

fn percent_change(baseline: Cents, current: Cents, difference: Cents) -> Decimal {
    if baseline == 0 {
        return if current == 0 {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
    }

    (Decimal::from(difference) * Decimal::ONE_HUNDRED / Decimal::from(baseline.unsigned_abs()))
        .round_dp_with_strategy(2, ROUNDING)
}

/// Field variances for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionVariance {
    /// Section compared.
    pub section: Section,
    /// Budget, forecast and variance movements.
    pub fields: Vec<FieldVariance>,
}

/// Per-line movement. Not produced yet; the list in [`SnapshotComparison`] is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineVariance {
    /// Line compared.
    pub cost_line_id: CostLineId,
    /// Field movements for the line.
    pub fields: Vec<FieldVariance>,
}

/// Counts of improved, worsened and unchanged comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Forecast went down.
    pub improved: u32,
    /// Forecast went up.
    pub worsened: u32,
    /// Forecast unchanged.
    pub unchanged: u32,
}

impl ComparisonSummary {
    fn record_forecast(&mut self, forecast: &FieldVariance) {
        match forecast.direction {
            VarianceDirection::Decrease => self.improved += 1,
            VarianceDirection::Increase => self.worsened += 1,
            VarianceDirection::Unchanged => self.unchanged += 1,
        }
    }
}

/// Result of comparing current totals with a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotComparison {
    /// Project-level movements, one per [`ComparedField::TOTALS`] entry.
    pub totals: Vec<FieldVariance>,
    /// Section movements for sections present on both sides.
    pub sections: Vec<SectionVariance>,
    /// Per-line movements.
    pub cost_lines: Vec<CostLineVariance>,
    /// Summary counts.
    pub summary: ComparisonSummary,
}

impl SnapshotComparison {
    /// Project-level movement of `field`.
    #[must_use]
    pub fn total(&self, field: ComparedField) -> Option<&FieldVariance> {
        self.totals.iter().find(|variance| variance.field == field)
    }
}

/// Compares current cost plan totals with a baseline snapshot.
pub struct SnapshotComparator;

impl SnapshotComparator {
    /// Compares `current` against `baseline`.
    ///
    /// Sections missing from either side are skipped.
    #[must_use]
    pub fn compare(current: &CostPlanTotals, baseline: &Snapshot) -> SnapshotComparison {
        let totals = compare_fields(&ComparedField::TOTALS, &baseline.totals, &current.project);

        let sections: Vec<SectionVariance> = Section::ALL
            .into_iter()
            .filter_map(|section| {
                let before = baseline.section(section)?;
                let now = current.section(section)?;
                Some(SectionVariance {
                    section,
                    fields: compare_fields(&ComparedField::SECTION, before, &now.figures),
                })
            })
            .collect();

        let mut summary = ComparisonSummary::default();
        if let Some(forecast) = totals
            .iter()
            .find(|variance| variance.field == ComparedField::Forecast)
        {
            summary.record_forecast(forecast);
        }

        debug!(
            snapshot_id = %baseline.id,
            sections = sections.len(),
            improved = summary.improved,
            worsened = summary.worsened,
            unchanged = summary.unchanged,
            "Compared cost plan against snapshot"
        );

        SnapshotComparison {
            totals,
            sections,
            cost_lines: Vec::new(),
            summary,
        }
    }
}

fn compare_fields(
    fields: &[ComparedField],
    baseline: &CostFigures,
    current: &CostFigures,
) -> Vec<FieldVariance> {
    fields
        .iter()
        .map(|&field| FieldVariance::between(field, field.read(baseline), field.read(current)))
        .collect()
}
