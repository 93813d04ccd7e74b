//! Per-firm price totals for an evaluation scope.

use std::collections::{BTreeMap, HashMap};

use costplan_shared::types::{Cents, EvaluationRowId, FirmId};
use serde::{Deserialize, Serialize};

use super::types::{EvaluationCell, EvaluationRow, TableType};

/// One firm's priced totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmTotals {
    /// Tendering firm.
    pub firm_id: FirmId,
    /// Sum over `initial_price` rows.
    pub initial_price_cents: Cents,
    /// Sum over `adds_subs` rows.
    pub adds_subs_cents: Cents,
    /// Initial price plus adds and subs.
    pub total_cents: Cents,
}

/// Totals each firm's cells over `rows`, ordered by firm id.
///
/// Cells pointing at rows outside `rows` are ignored.
#[must_use]
pub fn firm_totals(rows: &[EvaluationRow], cells: &[EvaluationCell]) -> Vec<FirmTotals> {
    let tables: HashMap<EvaluationRowId, TableType> =
        rows.iter().map(|row| (row.id, row.table_type)).collect();

    let mut totals: BTreeMap<FirmId, FirmTotals> = BTreeMap::new();
    for cell in cells {
        let Some(table) = tables.get(&cell.row_id) else {
            continue;
        };
        let entry = totals.entry(cell.firm_id).or_insert_with(|| FirmTotals {
            firm_id: cell.firm_id,
            ..FirmTotals::default()
        });
        match table {
            TableType::InitialPrice => entry.initial_price_cents += cell.amount_cents,
            TableType::AddsSubs => entry.adds_subs_cents += cell.amount_cents,
        }
        entry.total_cents += cell.amount_cents;
    }

    totals.into_values().collect()
}
