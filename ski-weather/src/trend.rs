//! Snow-depth trend and qualitative snow conditions.

use crate::daily::DailyWeatherSummary;
use serde::{Deserialize, Serialize};
use ski_utils::rounding::{round_opt, round_to};
use std::fmt;

/// Changes within this many inches either way count as stable.
pub const STABLE_BAND_IN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowDepthTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl SnowDepthTrend {
    pub fn from_change(change_in: f64) -> Self {
        if change_in > STABLE_BAND_IN {
            SnowDepthTrend::Increasing
        } else if change_in < -STABLE_BAND_IN {
            SnowDepthTrend::Decreasing
        } else {
            SnowDepthTrend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SnowDepthTrend::Increasing => "increasing",
            SnowDepthTrend::Decreasing => "decreasing",
            SnowDepthTrend::Stable => "stable",
        }
    }
}

impl fmt::Display for SnowDepthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnowConditions {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl SnowConditions {
    /// Classify from the latest snow depth and the depth trend.
    ///
    /// Rules are checked in order; the first match wins.
    pub fn classify(latest_depth_in: Option<f64>, trend: SnowDepthTrend) -> Self {
        let Some(depth) = latest_depth_in else {
            return SnowConditions::Unknown;
        };
        if depth >= 40.0 && trend != SnowDepthTrend::Decreasing {
            SnowConditions::Excellent
        } else if depth >= 25.0 || (depth >= 15.0 && trend == SnowDepthTrend::Increasing) {
            SnowConditions::Good
        } else if depth >= 10.0 {
            SnowConditions::Fair
        } else {
            SnowConditions::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SnowConditions::Excellent => "excellent",
            SnowConditions::Good => "good",
            SnowConditions::Fair => "fair",
            SnowConditions::Poor => "poor",
            SnowConditions::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SnowConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend over a window of daily summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherTrend {
    /// Second-half average depth minus first-half average depth.
    pub snow_depth_change_in: f64,
    pub snow_depth_trend: SnowDepthTrend,
    /// Mean of every daily high and low in the window.
    pub temp_avg_f: Option<f64>,
    pub total_precip_in: f64,
    pub latest_snow_depth_in: Option<f64>,
    pub snow_conditions: SnowConditions,
}

impl WeatherTrend {
    /// Derive the trend from daily summaries in ascending date order.
    ///
    /// The non-null depths are split at `len / 2`; with an odd count the
    /// middle value lands in the second half. Fewer than two depths give a
    /// change of zero.
    pub fn from_daily(daily: &[DailyWeatherSummary]) -> Self {
        let depths: Vec<f64> = daily.iter().filter_map(|d| d.snow_depth_avg_in).collect();

        let change = if depths.len() >= 2 {
            let (first, second) = depths.split_at(depths.len() / 2);
            average(second) - average(first)
        } else {
            0.0
        };
        let trend = SnowDepthTrend::from_change(change);

        let temps: Vec<f64> = daily
            .iter()
            .filter_map(|d| d.temp_max_f)
            .chain(daily.iter().filter_map(|d| d.temp_min_f))
            .collect();
        let temp_avg = (!temps.is_empty()).then(|| average(&temps));

        let total_precip: f64 = daily.iter().filter_map(|d| d.precip_total_in).sum();
        let latest = depths.last().copied();

        WeatherTrend {
            snow_depth_change_in: round_to(change, 1),
            snow_depth_trend: trend,
            temp_avg_f: round_opt(temp_avg, 1),
            total_precip_in: round_to(total_precip, 2),
            latest_snow_depth_in: round_opt(latest, 1),
            snow_conditions: SnowConditions::classify(latest, trend),
        }
    }
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
