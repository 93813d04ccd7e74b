//! Per-line financial derivation.

pub mod service;
pub mod types;


pub use service::CostLineCalculator;
pub use types::CalculatedCostLine;
