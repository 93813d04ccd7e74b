//! Cost plan records, selection and aggregation.

pub mod aggregator;
pub mod error;
pub mod figures;
pub mod selection;
pub mod types;

pub use aggregator::{CostPlanAggregator, CostPlanTotals, SectionTotals};
pub use error::CostPlanError;
pub use figures::CostFigures;
pub use selection::select_cost_lines;
pub use types::{
    Allocation, CostLine, CostLineChild, Invoice, InvoiceStatus, ReportingPeriod, Section,
    StakeholderGroup, Variation, VariationCategory, VariationStatus,
};
