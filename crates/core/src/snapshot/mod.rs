//! Baseline snapshots, comparison against them, and trends across them.

pub mod comparator;
pub mod trend;
pub mod types;

pub use comparator::{
    ComparedField, ComparisonSummary, CostLineVariance, FieldVariance, SectionVariance,
    SnapshotComparator, SnapshotComparison, VarianceDirection,
};
pub use trend::{
    DEFAULT_TREND_THRESHOLD_PERCENT, ForecastTrend, TrendAnalysis, TrendAnalyzer, TrendPoint,
    VarianceTrend,
};
pub use types::Snapshot;
