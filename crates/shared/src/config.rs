//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Tunables handed to the engine as explicit arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Currency used when formatting amounts.
    #[serde(default)]
    pub currency: Currency,
    /// GST rate as a fraction (0.10 = 10%).
    #[serde(default = "default_gst_rate")]
    pub gst_rate: Decimal,
    /// Percentage of the first value a trend must move before it stops being stable.
    #[serde(default = "default_trend_threshold_percent")]
    pub trend_threshold_percent: Decimal,
    /// Tolerance in cents when comparing reconciled totals.
    #[serde(default = "default_cents_tolerance")]
    pub cents_tolerance: i64,
}

fn default_gst_rate() -> Decimal {
    Decimal::new(10, 2)
}

fn default_trend_threshold_percent() -> Decimal {
    Decimal::from(5)
}

fn default_cents_tolerance() -> i64 {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            gst_rate: default_gst_rate(),
            trend_threshold_percent: default_trend_threshold_percent(),
            cents_tolerance: default_cents_tolerance(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COSTPLAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
