//! Shared types, errors, and configuration for the cost plan engine.
//!
//! This crate provides common types used across all other crates:
//! - Integer-cent money types and supported currencies
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Engine configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, EngineConfig};
pub use error::{AppError, AppResult};
