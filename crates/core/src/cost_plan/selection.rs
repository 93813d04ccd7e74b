//! Picks the cost lines an evaluation mirrors.

use costplan_shared::types::StakeholderId;

use super::types::{CostLine, StakeholderGroup};

/// Live cost lines for one stakeholder in the section its group evaluates,
/// ordered by `sort_order` (ties keep input order).
///
/// Groups without an evaluated section select nothing.
#[must_use]
pub fn select_cost_lines(
    lines: &[CostLine],
    stakeholder_id: StakeholderId,
    group: StakeholderGroup,
) -> Vec<CostLine> {
    let Some(section) = group.evaluated_section() else {
        return Vec::new();
    };

    let mut selected: Vec<CostLine> = lines
        .iter()
        .filter(|line| {
            line.deleted_at.is_none()
                && line.section == section
                && line.stakeholder_id == Some(stakeholder_id)
        })
        .cloned()
        .collect();
    selected.sort_by_key(|line| line.sort_order);
    selected
}
