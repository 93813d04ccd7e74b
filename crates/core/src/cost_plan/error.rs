//! Cost plan input errors.

use thiserror::Error;

/// Errors raised while building cost plan inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostPlanError {
    /// Month outside 1..=12.
    #[error("Invalid reporting month: {0}")]
    InvalidMonth(u32),

    /// Period text not in `YYYY-MM` form.
    #[error("Invalid reporting period: {0}")]
    InvalidPeriod(String),

    /// Unknown cost plan section name.
    #[error("Unknown cost plan section: {0}")]
    UnknownSection(String),
}
