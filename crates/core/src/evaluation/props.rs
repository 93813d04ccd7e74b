//! Property-based tests for evaluation row reconciliation.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::plan::ActionPlan;
use super::reconciler::EvaluationRowReconciler;
use super::tombstone::{TombstoneStore, record_row_deletion};
use super::types::{Evaluation, EvaluationRow, RowSource, TableType};
use crate::cost_plan::{CostLine, Section};
use costplan_shared::types::{
    CostLineId, EvaluationId, EvaluationPriceId, EvaluationRowId, ProjectId, StakeholderId,
};

const DESCRIPTIONS: [&str; 5] = ["Demolition", "demolition ", "Piling", "ROOFING", "Roofing"];
const ID_POOL: u128 = 8;

fn evaluation_id() -> EvaluationId {
    EvaluationId::from_u128(1)
}

/// Cost lines with unique ids, already in sort order.
fn arb_cost_lines() -> impl Strategy<Value = Vec<CostLine>> {
    prop::sample::subsequence((1..=ID_POOL).collect::<Vec<_>>(), 0..=ID_POOL as usize)
        .prop_flat_map(|ids| {
            let len = ids.len();
            (Just(ids), prop::collection::vec(0..DESCRIPTIONS.len(), len))
        })
        .prop_map(|(ids, descriptions)| {
            ids.into_iter()
                .zip(descriptions)
                .enumerate()
                .map(|(position, (id, description))| CostLine {
                    id: CostLineId::from_u128(id),
                    project_id: ProjectId::from_u128(1),
                    section: Section::Construction,
                    cost_code: String::new(),
                    activity: DESCRIPTIONS[description].to_string(),
                    budget_cents: 0,
                    sort_order: i32::try_from(position).unwrap_or(i32::MAX),
                    discipline_id: None,
                    trade_id: None,
                    stakeholder_id: None,
                    deleted_at: None,
                })
                .collect()
        })
}

fn arb_row_shape() -> impl Strategy<Value = (Option<u128>, usize, u32, bool, bool, bool)> {
    (
        prop::option::weighted(0.6, 1..=ID_POOL + 2),
        0..DESCRIPTIONS.len(),
        0u32..10,
        prop::bool::weighted(0.8),
        prop::bool::weighted(0.1),
        prop::bool::weighted(0.9),
    )
}

fn arb_rows(price_id: Option<EvaluationPriceId>) -> impl Strategy<Value = Vec<EvaluationRow>> {
    prop::collection::vec(arb_row_shape(), 0..10).prop_map(move |shapes| {
        shapes
            .into_iter()
            .zip(100u128..)
            .map(
                |((cost_line, description, order_index, from_plan, system, initial), id)| {
                    EvaluationRow {
                        id: EvaluationRowId::from_u128(id),
                        evaluation_id: evaluation_id(),
                        evaluation_price_id: price_id,
                        table_type: if initial {
                            TableType::InitialPrice
                        } else {
                            TableType::AddsSubs
                        },
                        description: DESCRIPTIONS[description].to_string(),
                        order_index,
                        cost_line_id: cost_line.map(CostLineId::from_u128),
                        source: if from_plan {
                            RowSource::CostPlan
                        } else {
                            RowSource::Manual
                        },
                        is_system_row: system,
                    }
                },
            )
            .collect()
    })
}

fn arb_tombstones() -> impl Strategy<Value = BTreeSet<CostLineId>> {
    prop::collection::btree_set((1..=ID_POOL).prop_map(CostLineId::from_u128), 0..4)
}

fn evaluation(store: TombstoneStore) -> Evaluation {
    Evaluation {
        id: evaluation_id(),
        project_id: ProjectId::from_u128(1),
        stakeholder_id: StakeholderId::from_u128(1),
        deleted_cost_line_ids: store,
    }
}

fn protected_rows(rows: &[EvaluationRow]) -> BTreeSet<EvaluationRowId> {
    rows.iter()
        .filter(|row| !row.is_reconcilable())
        .map(|row| row.id)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Applying a plan and reconciling again yields nothing to do.
    #[test]
    fn prop_reconcile_is_idempotent(
        lines in arb_cost_lines(),
        rows in arb_rows(None),
        tombstones in arb_tombstones(),
    ) {
        let mut rows = rows;
        let first = EvaluationRowReconciler::reconcile(&lines, &rows, &tombstones);
        first.apply(&mut rows, evaluation_id(), None);

        let second = EvaluationRowReconciler::reconcile(&lines, &rows, &tombstones);
        prop_assert!(second.is_empty(), "second run produced {:?}", second);
    }

    /// No create, link or update ever targets a hidden cost line.
    #[test]
    fn prop_tombstoned_lines_are_never_targeted(
        lines in arb_cost_lines(),
        rows in arb_rows(None),
        tombstones in arb_tombstones(),
    ) {
        let plan = EvaluationRowReconciler::reconcile(&lines, &rows, &tombstones);
        for id in plan.targeted_cost_lines(&rows) {
            prop_assert!(!tombstones.contains(&id), "targeted hidden line {}", id);
        }
    }

    /// Manual and system rows are never linked or deleted.
    #[test]
    fn prop_manual_and_system_rows_never_linked_or_deleted(
        lines in arb_cost_lines(),
        rows in arb_rows(None),
        tombstones in arb_tombstones(),
    ) {
        let protected = protected_rows(&rows);
        let plan: ActionPlan = EvaluationRowReconciler::reconcile(&lines, &rows, &tombstones);

        for link in &plan.links {
            prop_assert!(!protected.contains(&link.row_id));
        }
        for deleted in &plan.deletes {
            prop_assert!(!protected.contains(deleted));
        }
    }

    /// Hiding a line in one scope leaves another scope's plan unchanged.
    #[test]
    fn prop_scope_isolation(
        lines in arb_cost_lines(),
        rows_a in arb_rows(Some(EvaluationPriceId::from_u128(0xA))),
        rows_b in arb_rows(Some(EvaluationPriceId::from_u128(0xB))),
        hidden in 1..=ID_POOL,
    ) {
        let scope_a = Some(EvaluationPriceId::from_u128(0xA));
        let scope_b = Some(EvaluationPriceId::from_u128(0xB));
        // Row ids must be unique across scopes.
        let rows_b: Vec<EvaluationRow> = rows_b
            .into_iter()
            .map(|mut row| {
                row.id = EvaluationRowId::from_u128(row.id.0.as_u128() + 1_000);
                row
            })
            .collect();
        let all_rows: Vec<EvaluationRow> = rows_a.iter().chain(&rows_b).cloned().collect();

        let mut evaluation = evaluation(TombstoneStore::default());
        let before =
            EvaluationRowReconciler::reconcile_scope(&evaluation, scope_b, &lines, &all_rows);

        let deleted = EvaluationRow {
            id: EvaluationRowId::from_u128(9_999),
            evaluation_id: evaluation_id(),
            evaluation_price_id: scope_a,
            table_type: TableType::InitialPrice,
            description: String::new(),
            order_index: 0,
            cost_line_id: Some(CostLineId::from_u128(hidden)),
            source: RowSource::CostPlan,
            is_system_row: false,
        };
        record_row_deletion(&mut evaluation, &deleted).unwrap();

        let after =
            EvaluationRowReconciler::reconcile_scope(&evaluation, scope_b, &lines, &all_rows);
        prop_assert_eq!(before, after);

        let plan_a =
            EvaluationRowReconciler::reconcile_scope(&evaluation, scope_a, &lines, &all_rows);
        for id in plan_a.targeted_cost_lines(&rows_a) {
            prop_assert_ne!(id, CostLineId::from_u128(hidden));
        }
    }
}
