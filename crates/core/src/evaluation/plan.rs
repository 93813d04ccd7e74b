//! Row mutations produced by reconciliation.
//!
//! The reconciler never touches storage. It returns an [`ActionPlan`] that
//! the caller executes, ideally inside one transaction.

use costplan_shared::types::{CostLineId, EvaluationId, EvaluationPriceId, EvaluationRowId};
use serde::{Deserialize, Serialize};

use super::types::{EvaluationRow, RowSource, TableType};

/// A row to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRow {
    /// Table of the new row.
    pub table_type: TableType,
    /// Description copied from the cost line.
    pub description: String,
    /// Display position.
    pub order_index: u32,
    /// Mirrored cost line.
    pub cost_line_id: CostLineId,
    /// Always [`RowSource::CostPlan`] for reconciled rows.
    pub source: RowSource,
}

/// Description and position changes for an already linked row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowUpdate {
    /// Row to update.
    pub row_id: EvaluationRowId,
    /// New description.
    pub description: String,
    /// New display position.
    pub order_index: u32,
}

/// Attaches an unlinked row to a cost line.
///
/// The row also takes the cost line's description so that the next
/// reconciliation finds nothing to update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowLink {
    /// Row to link.
    pub row_id: EvaluationRowId,
    /// Cost line it now mirrors.
    pub cost_line_id: CostLineId,
    /// Description copied from the cost line.
    pub description: String,
    /// Display position.
    pub order_index: u32,
}

/// Everything one reconciliation wants done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    /// Rows to insert.
    pub creates: Vec<NewRow>,
    /// Rows to update.
    pub updates: Vec<RowUpdate>,
    /// Rows to link.
    pub links: Vec<RowLink>,
    /// Rows to delete.
    pub deletes: Vec<EvaluationRowId>,
}

impl ActionPlan {
    /// True when there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty()
            && self.updates.is_empty()
            && self.links.is_empty()
            && self.deletes.is_empty()
    }

    /// Total number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creates.len() + self.updates.len() + self.links.len() + self.deletes.len()
    }

    /// Cost lines targeted by a create, link or update.
    pub fn targeted_cost_lines<'a>(
        &'a self,
        rows: &'a [EvaluationRow],
    ) -> impl Iterator<Item = CostLineId> + 'a {
        let updated = self.updates.iter().filter_map(move |update| {
            rows.iter()
                .find(|row| row.id == update.row_id)
                .and_then(|row| row.cost_line_id)
        });

        self.creates
            .iter()
            .map(|create| create.cost_line_id)
            .chain(self.links.iter().map(|link| link.cost_line_id))
            .chain(updated)
    }

    /// Executes the plan against an in-memory row list.
    ///
    /// Created rows get fresh ids and belong to `evaluation_id` and
    /// `evaluation_price_id`. Returns the ids of created rows.
    pub fn apply(
        &self,
        rows: &mut Vec<EvaluationRow>,
        evaluation_id: EvaluationId,
        evaluation_price_id: Option<EvaluationPriceId>,
    ) -> Vec<EvaluationRowId> {
        for link in &self.links {
            if let Some(row) = rows.iter_mut().find(|row| row.id == link.row_id) {
                row.cost_line_id = Some(link.cost_line_id);
                row.description.clone_from(&link.description);
                row.order_index = link.order_index;
                row.source = RowSource::CostPlan;
            }
        }

        for update in &self.updates {
            if let Some(row) = rows.iter_mut().find(|row| row.id == update.row_id) {
                row.description.clone_from(&update.description);
                row.order_index = update.order_index;
            }
        }

        rows.retain(|row| !self.deletes.contains(&row.id));

        self.creates
            .iter()
            .map(|create| {
                let id = EvaluationRowId::new();
                rows.push(EvaluationRow {
                    id,
                    evaluation_id,
                    evaluation_price_id,
                    table_type: create.table_type,
                    description: create.description.clone(),
                    order_index: create.order_index,
                    cost_line_id: Some(create.cost_line_id),
                    source: create.source,
                    is_system_row: false,
                });
                id
            })
            .collect()
    }
}
