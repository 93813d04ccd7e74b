//! Section and project totals.

use serde::{Deserialize, Serialize};

use super::figures::CostFigures;
use super::types::Section;
use crate::cost_line::CalculatedCostLine;

/// Totals for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTotals {
    /// The section.
    pub section: Section,
    /// Number of lines summed.
    pub line_count: usize,
    /// Summed figures.
    #[serde(flatten)]
    pub figures: CostFigures,
}

/// Totals for a whole cost plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostPlanTotals {
    /// One entry per section, always all four, in [`Section::ALL`] order.
    pub sections: Vec<SectionTotals>,
    /// Sum over every section.
    pub project: CostFigures,
}

impl CostPlanTotals {
    /// Totals for `section`.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&SectionTotals> {
        self.sections.iter().find(|totals| totals.section == section)
    }
}

/// Sums calculated lines into section and project totals.
pub struct CostPlanAggregator;

impl CostPlanAggregator {
    /// Aggregates calculated lines.
    ///
    /// Sections without lines still appear with zero totals.
    #[must_use]
    pub fn aggregate(lines: &[CalculatedCostLine]) -> CostPlanTotals {
        let sections: Vec<SectionTotals> = Section::ALL
            .into_iter()
            .map(|section| {
                let in_section = lines.iter().filter(|line| line.section == section);
                SectionTotals {
                    section,
                    line_count: in_section.clone().count(),
                    figures: in_section.map(|line| line.figures).sum(),
                }
            })
            .collect();

        let project = sections.iter().map(|totals| totals.figures).sum();

        CostPlanTotals { sections, project }
    }
}
