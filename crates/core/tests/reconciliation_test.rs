//! Integration tests for evaluation row reconciliation.
//!
//! Drives selection, reconciliation, plan execution and the tombstone write
//! path together, the way a caller holding rows in memory would.

use std::collections::BTreeSet;

use costplan_core::cost_plan::{CostLine, Section, StakeholderGroup, select_cost_lines};
use costplan_core::evaluation::{
    Evaluation, EvaluationRow, EvaluationRowReconciler, RowSource, ScopeKey, TableType,
    TombstoneOutcome, TombstoneStore, record_row_deletion,
};
use costplan_shared::types::{
    CostLineId, EvaluationId, EvaluationPriceId, EvaluationRowId, ProjectId, StakeholderId,
};

const EVALUATION: EvaluationId = EvaluationId::from_u128(0xE0);
const CONTRACTOR: StakeholderId = StakeholderId::from_u128(0x5C);

fn cost_line(id: u128, activity: &str, sort_order: i32) -> CostLine {
    CostLine {
        id: CostLineId::from_u128(id),
        project_id: ProjectId::from_u128(1),
        section: Section::Construction,
        cost_code: format!("C-{id:02}"),
        activity: activity.to_string(),
        budget_cents: 100_000,
        sort_order,
        discipline_id: None,
        trade_id: None,
        stakeholder_id: Some(CONTRACTOR),
        deleted_at: None,
    }
}

fn row(id: u128, description: &str, cost_line_id: Option<u128>) -> EvaluationRow {
    EvaluationRow {
        id: EvaluationRowId::from_u128(id),
        evaluation_id: EVALUATION,
        evaluation_price_id: None,
        table_type: TableType::InitialPrice,
        description: description.to_string(),
        order_index: 0,
        cost_line_id: cost_line_id.map(CostLineId::from_u128),
        source: RowSource::CostPlan,
        is_system_row: false,
    }
}

fn evaluation() -> Evaluation {
    Evaluation {
        id: EVALUATION,
        project_id: ProjectId::from_u128(1),
        stakeholder_id: CONTRACTOR,
        deleted_cost_line_ids: TombstoneStore::default(),
    }
}

// ============================================================================
// Test: A new cost line creates a row
// ============================================================================
#[test]
fn test_new_cost_line_creates_row() {
    let lines = vec![cost_line(0xC1, "Demolition", 0)];

    let plan = EvaluationRowReconciler::reconcile(&lines, &[], &BTreeSet::new());

    assert_eq!(plan.creates.len(), 1);
    assert!(plan.updates.is_empty() && plan.links.is_empty() && plan.deletes.is_empty());

    let create = &plan.creates[0];
    assert_eq!(create.description, "Demolition");
    assert_eq!(create.cost_line_id, CostLineId::from_u128(0xC1));
    assert_eq!(create.order_index, 0);
    assert_eq!(create.source, RowSource::CostPlan);
    assert_eq!(create.table_type, TableType::InitialPrice);
}

// ============================================================================
// Test: An unlinked row with a matching description is adopted
// ============================================================================
#[test]
fn test_fuzzy_description_links_existing_row() {
    let lines = vec![cost_line(0xC1, "Demolition", 0)];
    let rows = vec![row(0xA1, "demolition ", None)];

    let plan = EvaluationRowReconciler::reconcile(&lines, &rows, &BTreeSet::new());

    assert!(plan.creates.is_empty());
    assert_eq!(plan.links.len(), 1);
    assert_eq!(plan.links[0].row_id, EvaluationRowId::from_u128(0xA1));
    assert_eq!(plan.links[0].cost_line_id, CostLineId::from_u128(0xC1));
    assert_eq!(plan.links[0].order_index, 0);
}

// ============================================================================
// Test: Removing a cost line deletes its row, hiding it does not
// ============================================================================
#[test]
fn test_removed_line_deletes_row_but_tombstoned_line_is_skipped() {
    let rows = vec![row(0xA1, "Demolition", Some(0xC1))];

    let removed = EvaluationRowReconciler::reconcile(&[], &rows, &BTreeSet::new());
    assert_eq!(removed.deletes, vec![EvaluationRowId::from_u128(0xA1)]);

    let lines = vec![cost_line(0xC1, "Demolition (revised)", 3)];
    let tombstones = BTreeSet::from([CostLineId::from_u128(0xC1)]);
    let hidden = EvaluationRowReconciler::reconcile(&lines, &rows, &tombstones);
    assert!(hidden.is_empty(), "tombstoned line must be left alone: {hidden:?}");
}

// ============================================================================
// Test: Manual rows are never linked or deleted
// ============================================================================
#[test]
fn test_manual_rows_are_never_linked_or_deleted() {
    let mut manual = row(0xA1, "Demolition", None);
    manual.source = RowSource::Manual;
    let mut orphaned_manual = row(0xA2, "Old work", Some(0xDEAD));
    orphaned_manual.source = RowSource::Manual;
    let lines = vec![cost_line(0xC1, "Demolition", 0)];

    let plan = EvaluationRowReconciler::reconcile(
        &lines,
        &[manual, orphaned_manual],
        &BTreeSet::new(),
    );

    assert!(plan.links.is_empty());
    assert!(plan.deletes.is_empty());
    assert_eq!(plan.creates.len(), 1);
}

// ============================================================================
// Test: Selection, reconciliation and execution settle in one pass
// ============================================================================
#[test]
fn test_full_pass_settles_and_second_run_is_empty() {
    let mut consultant_line = cost_line(0xF1, "Architect", 0);
    consultant_line.section = Section::Consultants;
    let mut other_stakeholder = cost_line(0xC9, "Scaffold", 0);
    other_stakeholder.stakeholder_id = Some(StakeholderId::from_u128(0x99));

    let plan_lines = vec![
        cost_line(0xC2, "Piling", 2),
        consultant_line,
        cost_line(0xC1, "Demolition", 1),
        other_stakeholder,
        cost_line(0xC3, "Roofing", 3),
    ];
    let lines = select_cost_lines(&plan_lines, CONTRACTOR, StakeholderGroup::Contractor);
    assert_eq!(
        lines.iter().map(|line| line.activity.as_str()).collect::<Vec<_>>(),
        vec!["Demolition", "Piling", "Roofing"]
    );

    let mut rows = vec![
        row(0xA1, " PILING", None),
        row(0xA2, "Roofing", Some(0xC3)),
        row(0xA3, "Removed line", Some(0xC7)),
    ];

    let plan = EvaluationRowReconciler::reconcile(&lines, &rows, &BTreeSet::new());
    assert_eq!(plan.creates.len(), 1);
    assert_eq!(plan.links.len(), 1);
    assert_eq!(plan.updates.len(), 1);
    assert_eq!(plan.deletes, vec![EvaluationRowId::from_u128(0xA3)]);

    let created = plan.apply(&mut rows, EVALUATION, None);
    assert_eq!(created.len(), 1);
    assert_eq!(rows.len(), 3);

    let mut ordered = rows.clone();
    ordered.sort_by_key(|row| row.order_index);
    assert_eq!(
        ordered
            .iter()
            .map(|row| (row.description.as_str(), row.order_index))
            .collect::<Vec<_>>(),
        vec![("Demolition", 0), ("Piling", 1), ("Roofing", 2)]
    );

    let second = EvaluationRowReconciler::reconcile(&lines, &rows, &BTreeSet::new());
    assert!(second.is_empty(), "second run must be a no-op: {second:?}");
}

// ============================================================================
// Test: A tombstone in one pricing scope leaves another scope alone
// ============================================================================
#[test]
fn test_tombstone_is_isolated_to_its_scope() {
    let price_a = Some(EvaluationPriceId::from_u128(0xA));
    let price_b = Some(EvaluationPriceId::from_u128(0xB));
    let lines = vec![cost_line(0xC1, "Demolition", 0)];

    let mut evaluation = evaluation();
    let mut rows: Vec<EvaluationRow> = Vec::new();
    for scope in [price_a, price_b] {
        let plan = EvaluationRowReconciler::reconcile_scope(&evaluation, scope, &lines, &rows);
        plan.apply(&mut rows, EVALUATION, scope);
    }
    assert_eq!(rows.len(), 2);

    // User deletes the row under price A.
    let deleted = rows
        .iter()
        .position(|row| row.evaluation_price_id == price_a)
        .map(|index| rows.remove(index))
        .unwrap();
    let outcome = record_row_deletion(&mut evaluation, &deleted).unwrap();
    assert_eq!(outcome, TombstoneOutcome::Recorded);

    let plan_a = EvaluationRowReconciler::reconcile_scope(&evaluation, price_a, &lines, &rows);
    assert!(plan_a.is_empty(), "hidden line must not be recreated: {plan_a:?}");

    let plan_b = EvaluationRowReconciler::reconcile_scope(&evaluation, price_b, &lines, &rows);
    assert!(plan_b.is_empty());

    // Dropping price B's row brings it back, because B has no tombstone.
    rows.retain(|row| row.evaluation_price_id != price_b);
    let plan_b = EvaluationRowReconciler::reconcile_scope(&evaluation, price_b, &lines, &rows);
    assert_eq!(plan_b.creates.len(), 1);
}

// ============================================================================
// Test: A legacy tombstone array is honoured and migrated on write
// ============================================================================
#[test]
fn test_legacy_tombstones_read_as_default_scope_and_migrate() {
    let hidden = CostLineId::from_u128(0xC1);
    let stored = format!(r#"["{hidden}"]"#);

    let mut evaluation = evaluation();
    evaluation.deleted_cost_line_ids = TombstoneStore::decode(Some(stored.as_str())).unwrap();
    assert!(evaluation.deleted_cost_line_ids.is_legacy());

    let lines = vec![
        cost_line(0xC1, "Demolition", 0),
        cost_line(0xC2, "Piling", 1),
    ];
    let plan = EvaluationRowReconciler::reconcile_scope(&evaluation, None, &lines, &[]);
    assert_eq!(plan.creates.len(), 1);
    assert_eq!(plan.creates[0].cost_line_id, CostLineId::from_u128(0xC2));

    let mut rows = Vec::new();
    plan.apply(&mut rows, EVALUATION, None);
    let outcome = record_row_deletion(&mut evaluation, &rows[0]).unwrap();
    assert_eq!(outcome, TombstoneOutcome::Recorded);
    assert!(!evaluation.deleted_cost_line_ids.is_legacy());

    let encoded = evaluation.deleted_cost_line_ids.encode().unwrap();
    let reloaded = TombstoneStore::decode(Some(encoded.as_str())).unwrap();
    assert!(reloaded.is_hidden(ScopeKey::DEFAULT, hidden));
    assert!(reloaded.is_hidden(ScopeKey::DEFAULT, CostLineId::from_u128(0xC2)));
}
