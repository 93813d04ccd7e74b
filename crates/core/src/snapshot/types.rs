//! Frozen cost plan baselines.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use costplan_shared::types::{ProjectId, SnapshotId};
use serde::{Deserialize, Serialize};

use crate::cost_line::CalculatedCostLine;
use crate::cost_plan::{CostFigures, CostPlanTotals, Section};

/// An immutable capture of a cost plan's figures at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot ID.
    pub id: SnapshotId,
    /// Project the snapshot belongs to.
    pub project_id: ProjectId,
    /// Label given when the baseline was saved.
    pub name: String,
    /// Capture time.
    pub created_at: DateTime<Utc>,
    /// Project totals.
    pub totals: CostFigures,
    /// Totals per section. Older snapshots may lack some sections.
    #[serde(default)]
    pub section_totals: BTreeMap<Section, CostFigures>,
    /// Per-line figures.
    #[serde(default)]
    pub cost_lines: Vec<CalculatedCostLine>,
}

impl Snapshot {
    /// Freezes the current totals and line figures into a new snapshot.
    #[must_use]
    pub fn capture(
        project_id: ProjectId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        totals: &CostPlanTotals,
        lines: &[CalculatedCostLine],
    ) -> Self {
        Self {
            id: SnapshotId::new(),
            project_id,
            name: name.into(),
            created_at,
            totals: totals.project,
            section_totals: totals
                .sections
                .iter()
                .map(|section| (section.section, section.figures))
                .collect(),
            cost_lines: lines.to_vec(),
        }
    }

    /// Totals for `section`, if the snapshot recorded them.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&CostFigures> {
        self.section_totals.get(&section)
    }
}
