//! Evaluation rows mirrored from the cost plan.
//!
//! Reconciliation aligns a stakeholder's `initial_price` rows with the cost
//! lines of its section, one pricing scope at a time, while honouring lines
//! the user has hidden from that scope.

pub mod error;
pub mod plan;
pub mod reconciler;
pub mod tombstone;
pub mod totals;
pub mod types;

#[cfg(test)]
mod props;

pub use error::EvaluationError;
pub use plan::{ActionPlan, NewRow, RowLink, RowUpdate};
pub use reconciler::EvaluationRowReconciler;
pub use tombstone::{
    DEFAULT_SCOPE_KEY, ScopeKey, TombstoneOutcome, TombstoneStore, record_row_deletion,
};
pub use totals::{FirmTotals, firm_totals};
pub use types::{Evaluation, EvaluationCell, EvaluationRow, RowSource, TableType};
