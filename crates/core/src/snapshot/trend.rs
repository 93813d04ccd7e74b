//! Direction of travel across saved snapshots.

use chrono::{DateTime, Utc};
use costplan_shared::types::Cents;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Snapshot;

/// Default movement, as a percentage of the first value, that counts as a trend.
pub const DEFAULT_TREND_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Key figures of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Capture time of the snapshot.
    pub date: DateTime<Utc>,
    /// Budget.
    pub budget_cents: Cents,
    /// Final forecast.
    pub forecast_cents: Cents,
    /// Budget less final forecast.
    pub variance_cents: Cents,
    /// Claimed to date.
    pub claimed_cents: Cents,
}

impl From<&Snapshot> for TrendPoint {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            date: snapshot.created_at,
            budget_cents: snapshot.totals.budget_cents,
            forecast_cents: snapshot.totals.final_forecast_cents,
            variance_cents: snapshot.totals.variance_cents,
            claimed_cents: snapshot.totals.claimed_cents,
        }
    }
}

/// Direction of the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastTrend {
    /// Forecast rose past the threshold.
    Increasing,
    /// Forecast fell past the threshold.
    Decreasing,
    /// Within the threshold.
    Stable,
}

/// Direction of the variance. More margin under budget is an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceTrend {
    /// Variance rose past the threshold.
    Improving,
    /// Variance fell past the threshold.
    Worsening,
    /// Within the threshold.
    Stable,
}

/// Trend over a series of snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Points in capture order.
    pub points: Vec<TrendPoint>,
    /// Forecast direction.
    pub forecast_trend: ForecastTrend,
    /// Variance direction.
    pub variance_trend: VarianceTrend,
}

/// Movement of a series relative to its first value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Up,
    Down,
    Flat,
}

impl Movement {
    fn between(first: Cents, last: Cents, threshold_percent: Decimal) -> Self {
        let threshold =
            Decimal::from(first.unsigned_abs()) * threshold_percent / Decimal::ONE_HUNDRED;
        let delta = Decimal::from(last) - Decimal::from(first);

        if delta > threshold {
            Self::Up
        } else if -delta > threshold {
            Self::Down
        } else {
            Self::Flat
        }
    }

    const fn as_forecast(self) -> ForecastTrend {
        match self {
            Self::Up => ForecastTrend::Increasing,
            Self::Down => ForecastTrend::Decreasing,
            Self::Flat => ForecastTrend::Stable,
        }
    }

    const fn as_variance(self) -> VarianceTrend {
        match self {
            Self::Up => VarianceTrend::Improving,
            Self::Down => VarianceTrend::Worsening,
            Self::Flat => VarianceTrend::Stable,
        }
    }
}

/// Derives forecast and variance trends from snapshots.
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Analyzes `snapshots` in any order.
    ///
    /// Only the first and last points decide the trend. Fewer than two
    /// snapshots are always stable.
    #[must_use]
    pub fn analyze(snapshots: &[Snapshot], threshold_percent: Decimal) -> TrendAnalysis {
        let mut ordered: Vec<&Snapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|snapshot| snapshot.created_at);
        let points: Vec<TrendPoint> = ordered.into_iter().map(TrendPoint::from).collect();

        let (forecast_trend, variance_trend) = match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 => {
                let forecast =
                    Movement::between(first.forecast_cents, last.forecast_cents, threshold_percent);
                let variance =
                    Movement::between(first.variance_cents, last.variance_cents, threshold_percent);
                (forecast.as_forecast(), variance.as_variance())
            }
            _ => (ForecastTrend::Stable, VarianceTrend::Stable),
        };

        TrendAnalysis {
            points,
            forecast_trend,
            variance_trend,
        }
    }
}
