//! Evaluation data types.

use costplan_shared::types::{
    Cents, CostLineId, EvaluationId, EvaluationPriceId, EvaluationRowId, FirmId, ProjectId,
    StakeholderId,
};
use serde::{Deserialize, Serialize};

use super::tombstone::TombstoneStore;

/// Which table of the evaluation a row sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableType {
    /// Base tender price, mirrored from the cost plan.
    InitialPrice,
    /// Additions and subtractions entered by hand.
    AddsSubs,
}

/// Where a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSource {
    /// Typed in by a user; never touched by reconciliation.
    Manual,
    /// Mirrors a cost plan line.
    CostPlan,
}

/// A tender evaluation for one stakeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Evaluation ID.
    pub id: EvaluationId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Stakeholder being evaluated.
    pub stakeholder_id: StakeholderId,
    /// Cost lines hidden per pricing scope.
    #[serde(default, deserialize_with = "super::tombstone::deserialize_nullable")]
    pub deleted_cost_line_ids: TombstoneStore,
}

/// One row of an evaluation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRow {
    /// Row ID.
    pub id: EvaluationRowId,
    /// Owning evaluation.
    pub evaluation_id: EvaluationId,
    /// Pricing scope; `None` is the default scope.
    #[serde(default)]
    pub evaluation_price_id: Option<EvaluationPriceId>,
    /// Table the row sits in.
    pub table_type: TableType,
    /// Row description.
    pub description: String,
    /// Display position.
    pub order_index: u32,
    /// Linked cost line.
    #[serde(default)]
    pub cost_line_id: Option<CostLineId>,
    /// Origin of the row.
    pub source: RowSource,
    /// Rows the application maintains itself (totals, headings).
    #[serde(default)]
    pub is_system_row: bool,
}

impl EvaluationRow {
    /// Whether reconciliation may create, link, update or delete this row.
    #[must_use]
    pub fn is_reconcilable(&self) -> bool {
        !self.is_system_row && self.source == RowSource::CostPlan
    }
}

/// A firm's price for one row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationCell {
    /// Row priced.
    pub row_id: EvaluationRowId,
    /// Tendering firm.
    pub firm_id: FirmId,
    /// Firm type (e.g., "consultant", "contractor").
    pub firm_type: String,
    /// Priced amount in cents.
    pub amount_cents: Cents,
}
