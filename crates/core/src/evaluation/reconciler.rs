//! Keeps `initial_price` rows in step with the cost plan.

use std::collections::{BTreeSet, HashMap, HashSet};

use costplan_shared::types::{CostLineId, EvaluationPriceId};
use tracing::debug;

use super::plan::{ActionPlan, NewRow, RowLink, RowUpdate};
use super::tombstone::ScopeKey;
use super::types::{Evaluation, EvaluationRow, RowSource, TableType};
use crate::cost_plan::CostLine;

/// Synchronizes evaluation rows against the current cost line set.
pub struct EvaluationRowReconciler;

impl EvaluationRowReconciler {
    /// Plans the row changes for one pricing scope.
    ///
    /// `cost_lines` must already be filtered to the stakeholder's section and
    /// ordered by `sort_order`; `existing_rows` are the scope's rows. In one
    /// pass over the cost lines:
    ///
    /// 1. Lines in `tombstones` are skipped.
    /// 2. Unlinked lines adopt the first unlinked `initial_price` row with the
    ///    same trimmed, lowercased description, or get a new row.
    /// 3. Linked rows whose description or position drifted are updated.
    ///
    /// Finally, cost plan rows whose cost line no longer exists are deleted.
    /// Manual and system rows are never created, linked or deleted, though a
    /// linked one still has drifted description and position updated.
    ///
    /// Running it again on its own applied output yields an empty plan.
    #[must_use]
    pub fn reconcile(
        cost_lines: &[CostLine],
        existing_rows: &[EvaluationRow],
        tombstones: &BTreeSet<CostLineId>,
    ) -> ActionPlan {
        // Duplicate links resolve last-write-wins.
        let linked: HashMap<CostLineId, &EvaluationRow> = existing_rows
            .iter()
            .filter_map(|row| row.cost_line_id.map(|id| (id, row)))
            .collect();

        let mut unlinked: HashMap<String, &EvaluationRow> = HashMap::new();
        for row in existing_rows.iter().filter(|row| {
            row.cost_line_id.is_none()
                && row.table_type == TableType::InitialPrice
                && row.is_reconcilable()
        }) {
            unlinked.entry(normalize(&row.description)).or_insert(row);
        }

        let mut plan = ActionPlan::default();
        let mut skipped = 0usize;

        for (index, line) in cost_lines.iter().enumerate() {
            let order_index = u32::try_from(index).unwrap_or(u32::MAX);

            if tombstones.contains(&line.id) {
                skipped += 1;
                continue;
            }

            match linked.get(&line.id) {
                None => match unlinked.remove(&normalize(&line.activity)) {
                    Some(row) => plan.links.push(RowLink {
                        row_id: row.id,
                        cost_line_id: line.id,
                        description: line.activity.clone(),
                        order_index,
                    }),
                    None => plan.creates.push(NewRow {
                        table_type: TableType::InitialPrice,
                        description: line.activity.clone(),
                        order_index,
                        cost_line_id: line.id,
                        source: RowSource::CostPlan,
                    }),
                },
                Some(row) => {
                    if row.description != line.activity || row.order_index != order_index {
                        plan.updates.push(RowUpdate {
                            row_id: row.id,
                            description: line.activity.clone(),
                            order_index,
                        });
                    }
                }
            }
        }

        let current: HashSet<CostLineId> = cost_lines.iter().map(|line| line.id).collect();
        plan.deletes = existing_rows
            .iter()
            .filter(|row| {
                row.is_reconcilable()
                    && row.cost_line_id.is_some_and(|id| !current.contains(&id))
            })
            .map(|row| row.id)
            .collect();

        debug!(
            creates = plan.creates.len(),
            updates = plan.updates.len(),
            links = plan.links.len(),
            deletes = plan.deletes.len(),
            skipped_tombstoned = skipped,
            "Reconciled evaluation rows"
        );

        plan
    }

    /// Plans the row changes for one scope of `evaluation`.
    ///
    /// Picks the scope's rows out of `rows` and reads its tombstones, so the
    /// caller can pass everything it loaded for the evaluation.
    #[must_use]
    pub fn reconcile_scope(
        evaluation: &Evaluation,
        evaluation_price_id: Option<EvaluationPriceId>,
        cost_lines: &[CostLine],
        rows: &[EvaluationRow],
    ) -> ActionPlan {
        let scope = ScopeKey::from(evaluation_price_id);
        let scoped: Vec<EvaluationRow> = rows
            .iter()
            .filter(|row| {
                row.evaluation_id == evaluation.id
                    && row.evaluation_price_id == evaluation_price_id
            })
            .cloned()
            .collect();

        debug!(
            evaluation_id = %evaluation.id,
            scope = %scope,
            rows = scoped.len(),
            "Reconciling scope"
        );

        Self::reconcile(
            cost_lines,
            &scoped,
            evaluation.deleted_cost_line_ids.for_scope(scope),
        )
    }
}

/// Description key used for fuzzy linking.
fn normalize(description: &str) -> String {
    description.trim().to_lowercase()
}
