//! Cost line calculator.

use std::collections::HashMap;

use costplan_shared::types::{Cents, CostLineId};

use super::types::CalculatedCostLine;
use crate::cost_plan::{
    Allocation, CostFigures, CostLine, CostLineChild, Invoice, ReportingPeriod, Variation,
    VariationStatus,
};

/// Derives forecast, variance, claimed and ETC figures for cost lines.
pub struct CostLineCalculator;

impl CostLineCalculator {
    /// Calculates one cost line.
    ///
    /// Only live records linked to `line` contribute, so callers may pass
    /// project-wide variation and invoice lists.
    ///
    /// - Approved contract: sum of allocations
    /// - Forecast variations: `amount_forecast_cents` of variations at `Forecast`
    /// - Approved variations: `amount_approved_cents` of variations at `Approved`
    /// - Claimed: invoices with period on or before `period`
    /// - Current month: invoices in exactly `period`
    #[must_use]
    pub fn calculate(
        line: &CostLine,
        allocations: &[Allocation],
        variations: &[Variation],
        invoices: &[Invoice],
        period: ReportingPeriod,
    ) -> CalculatedCostLine {
        Self::derive(
            line,
            allocations.iter().filter(|a| a.is_linked_to(line.id)),
            variations.iter().filter(|v| v.is_linked_to(line.id)),
            invoices.iter().filter(|i| i.is_linked_to(line.id)),
            period,
        )
    }

    /// Calculates every live line, indexing children once.
    #[must_use]
    pub fn calculate_all(
        lines: &[CostLine],
        allocations: &[Allocation],
        variations: &[Variation],
        invoices: &[Invoice],
        period: ReportingPeriod,
    ) -> Vec<CalculatedCostLine> {
        let allocations = index_by_line(allocations);
        let variations = index_by_line(variations);
        let invoices = index_by_line(invoices);

        lines
            .iter()
            .filter(|line| line.deleted_at.is_none())
            .map(|line| {
                Self::derive(
                    line,
                    children(&allocations, line.id),
                    children(&variations, line.id),
                    children(&invoices, line.id),
                    period,
                )
            })
            .collect()
    }

    fn derive<'a>(
        line: &CostLine,
        allocations: impl Iterator<Item = &'a Allocation>,
        variations: impl Iterator<Item = &'a Variation>,
        invoices: impl Iterator<Item = &'a Invoice>,
        period: ReportingPeriod,
    ) -> CalculatedCostLine {
        let approved_contract_cents: Cents = allocations.map(|a| a.amount_cents).sum();

        let mut forecast_variations_cents: Cents = 0;
        let mut approved_variations_cents: Cents = 0;
        for variation in variations {
            match variation.status {
                VariationStatus::Forecast => {
                    forecast_variations_cents += variation.amount_forecast_cents;
                }
                VariationStatus::Approved => {
                    approved_variations_cents += variation.amount_approved_cents;
                }
                VariationStatus::Rejected | VariationStatus::Withdrawn => {}
            }
        }

        let mut claimed_cents: Cents = 0;
        let mut current_month_cents: Cents = 0;
        for invoice in invoices {
            if invoice.period <= period {
                claimed_cents += invoice.amount_cents;
            }
            if invoice.period == period {
                current_month_cents += invoice.amount_cents;
            }
        }

        let final_forecast_cents =
            approved_contract_cents + forecast_variations_cents + approved_variations_cents;

        CalculatedCostLine {
            cost_line_id: line.id,
            section: line.section,
            cost_code: line.cost_code.clone(),
            activity: line.activity.clone(),
            sort_order: line.sort_order,
            figures: CostFigures {
                budget_cents: line.budget_cents,
                approved_contract_cents,
                forecast_variations_cents,
                approved_variations_cents,
                final_forecast_cents,
                variance_cents: line.budget_cents - final_forecast_cents,
                claimed_cents,
                current_month_cents,
                etc_cents: final_forecast_cents - claimed_cents,
            },
        }
    }
}

fn index_by_line<T: CostLineChild>(items: &[T]) -> HashMap<CostLineId, Vec<&T>> {
    let mut index: HashMap<CostLineId, Vec<&T>> = HashMap::new();
    for item in items.iter().filter(|item| !item.is_deleted()) {
        if let Some(id) = item.cost_line_id() {
            index.entry(id).or_default().push(item);
        }
    }
    index
}

fn children<'a, T>(
    index: &HashMap<CostLineId, Vec<&'a T>>,
    id: CostLineId,
) -> impl Iterator<Item = &'a T> {
    index.get(&id).into_iter().flatten().copied()
}
