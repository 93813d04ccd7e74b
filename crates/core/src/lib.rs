//! Core business logic for the cost plan engine.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Callers load records, invoke an operation, and persist whatever it returns.
//!
//! # Modules
//!
//! - `currency` - Integer-cent arithmetic, GST, formatting and parsing
//! - `cost_plan` - Cost lines, their children, selection and section totals
//! - `cost_line` - Per-line contract, variation and claim figures
//! - `evaluation` - Keeping tender evaluation rows in step with the cost plan
//! - `snapshot` - Baselines, comparison against them and trends

pub mod cost_line;
pub mod cost_plan;
pub mod currency;
pub mod evaluation;
pub mod snapshot;
