//! Command handlers.
//!
//! Each handler decodes one JSON document, runs one engine operation and
//! returns the serializable result. I/O stays in `main`.

use costplan_core::cost_line::{CalculatedCostLine, CostLineCalculator};
use costplan_core::cost_plan::{
    Allocation, CostLine, CostPlanAggregator, CostPlanTotals, Invoice, ReportingPeriod,
    StakeholderGroup, Variation, select_cost_lines,
};
use costplan_core::currency::{FormatOptions, cents_equal, format_currency, parse_currency_input};
use costplan_core::evaluation::{
    ActionPlan, Evaluation, EvaluationCell, EvaluationRow, EvaluationRowReconciler, FirmTotals,
    TombstoneOutcome, firm_totals, record_row_deletion,
};
use costplan_core::snapshot::{
    Snapshot, SnapshotComparator, SnapshotComparison, TrendAnalysis, TrendAnalyzer,
};
use costplan_shared::types::{Cents, EvaluationPriceId, StakeholderId};
use costplan_shared::{AppError, AppResult, EngineConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::FormatArgs;

/// Input for `calculate`.
#[derive(Debug, Deserialize)]
pub struct CalculateInput {
    /// Period claims are measured against.
    pub period: Option<ReportingPeriod>,
    /// Every cost line of the project.
    pub cost_lines: Vec<CostLine>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    /// Final forecast total printed elsewhere, checked against ours.
    #[serde(default)]
    pub reported_total_cents: Option<Cents>,
}

/// Output of `calculate`.
#[derive(Debug, Serialize)]
pub struct CalculateOutput {
    pub period: ReportingPeriod,
    pub lines: Vec<CalculatedCostLine>,
    pub totals: CostPlanTotals,
    pub final_forecast: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_total_matches: Option<bool>,
}

pub fn calculate(
    input: &str,
    period: Option<ReportingPeriod>,
    engine: &EngineConfig,
) -> AppResult<CalculateOutput> {
    let input: CalculateInput = serde_json::from_str(input)?;
    let period = period
        .or(input.period)
        .ok_or_else(|| AppError::Validation("a reporting period is required".to_string()))?;

    let lines = CostLineCalculator::calculate_all(
        &input.cost_lines,
        &input.allocations,
        &input.variations,
        &input.invoices,
        period,
    );
    let totals = CostPlanAggregator::aggregate(&lines);
    let options = FormatOptions {
        currency: engine.currency,
        gst_rate: engine.gst_rate,
        ..FormatOptions::default()
    };

    info!(%period, lines = lines.len(), "Calculated cost plan");

    Ok(CalculateOutput {
        period,
        final_forecast: format_currency(totals.project.final_forecast_cents, &options),
        reported_total_matches: input.reported_total_cents.map(|reported| {
            cents_equal(
                reported,
                totals.project.final_forecast_cents,
                engine.cents_tolerance,
            )
        }),
        lines,
        totals,
    })
}

/// Input for `reconcile`.
#[derive(Debug, Deserialize)]
pub struct ReconcileInput {
    pub evaluation: Evaluation,
    /// Pricing scope; absent means the default scope.
    #[serde(default)]
    pub evaluation_price_id: Option<EvaluationPriceId>,
    /// Group of the evaluation's stakeholder.
    pub stakeholder_group: StakeholderGroup,
    /// Every cost line of the project; selection happens here.
    pub cost_lines: Vec<CostLine>,
    #[serde(default)]
    pub rows: Vec<EvaluationRow>,
}

pub fn reconcile(input: &str) -> AppResult<ActionPlan> {
    let input: ReconcileInput = serde_json::from_str(input)?;
    let stakeholder_id: StakeholderId = input.evaluation.stakeholder_id;
    let lines = select_cost_lines(&input.cost_lines, stakeholder_id, input.stakeholder_group);

    let plan = EvaluationRowReconciler::reconcile_scope(
        &input.evaluation,
        input.evaluation_price_id,
        &lines,
        &input.rows,
    );

    info!(
        evaluation_id = %input.evaluation.id,
        actions = plan.len(),
        "Planned evaluation row changes"
    );
    Ok(plan)
}

/// Input for `hide-row`.
#[derive(Debug, Deserialize)]
pub struct HideRowInput {
    pub evaluation: Evaluation,
    /// Row the user deleted.
    pub row: EvaluationRow,
}

/// Output of `hide-row`.
#[derive(Debug, Serialize)]
pub struct HideRowOutput {
    pub outcome: TombstoneOutcome,
    /// Tombstone map to persist, in keyed form.
    pub deleted_cost_line_ids: String,
}

pub fn hide_row(input: &str) -> AppResult<HideRowOutput> {
    let HideRowInput { mut evaluation, row } = serde_json::from_str(input)?;

    let outcome = record_row_deletion(&mut evaluation, &row)
        .map_err(|err| AppError::Validation(err.to_string()))?;
    let deleted_cost_line_ids = evaluation
        .deleted_cost_line_ids
        .encode()
        .map_err(|err| AppError::Internal(err.to_string()))?;

    Ok(HideRowOutput {
        outcome,
        deleted_cost_line_ids,
    })
}

/// Input for `firm-totals`.
#[derive(Debug, Deserialize)]
pub struct FirmTotalsInput {
    pub rows: Vec<EvaluationRow>,
    pub cells: Vec<EvaluationCell>,
}

pub fn firm_totals_of(input: &str) -> AppResult<Vec<FirmTotals>> {
    let input: FirmTotalsInput = serde_json::from_str(input)?;
    Ok(firm_totals(&input.rows, &input.cells))
}

/// Input for `compare`.
#[derive(Debug, Deserialize)]
pub struct CompareInput {
    pub current: CostPlanTotals,
    pub baseline: Snapshot,
}

pub fn compare(input: &str) -> AppResult<SnapshotComparison> {
    let input: CompareInput = serde_json::from_str(input)?;
    Ok(SnapshotComparator::compare(&input.current, &input.baseline))
}

/// Input for `trend`.
#[derive(Debug, Deserialize)]
pub struct TrendInput {
    pub snapshots: Vec<Snapshot>,
}

pub fn trend(
    input: &str,
    threshold: Option<Decimal>,
    engine: &EngineConfig,
) -> AppResult<TrendAnalysis> {
    let input: TrendInput = serde_json::from_str(input)?;
    let threshold = threshold.unwrap_or(engine.trend_threshold_percent);
    if threshold.is_sign_negative() {
        return Err(AppError::Validation(format!(
            "trend threshold must not be negative: {threshold}"
        )));
    }
    Ok(TrendAnalyzer::analyze(&input.snapshots, threshold))
}

pub fn format(args: &FormatArgs, engine: &EngineConfig) -> String {
    let options = FormatOptions {
        currency: engine.currency,
        show_cents: !args.no_cents,
        show_sign: args.sign,
        compact: args.compact,
        show_gst: args.gst,
        gst_rate: engine.gst_rate,
    };
    format_currency(args.cents, &options)
}

pub fn parse(text: &str) -> Cents {
    parse_currency_input(text)
}
