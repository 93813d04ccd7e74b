//! Cents and currencies.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every monetary field is an `i64` count of cents; rates and percentages
//! use `rust_decimal::Decimal`.

use serde::{Deserialize, Serialize};

/// An amount in cents (minor currency units).
pub type Cents = i64;

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Australian Dollar
    #[default]
    Aud,
    /// New Zealand Dollar
    Nzd,
    /// US Dollar
    Usd,
    /// Pound Sterling
    Gbp,
    /// Euro
    Eur,
}

impl Currency {
    /// Returns the display symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Aud | Self::Nzd | Self::Usd => "$",
            Self::Gbp => "£",
            Self::Eur => "€",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aud => write!(f, "AUD"),
            Self::Nzd => write!(f, "NZD"),
            Self::Usd => write!(f, "USD"),
            Self::Gbp => write!(f, "GBP"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AUD" => Ok(Self::Aud),
            "NZD" => Ok(Self::Nzd),
            "USD" => Ok(Self::Usd),
            "GBP" => Ok(Self::Gbp),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
