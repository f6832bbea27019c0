use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily aggregated weather for a resort from a reanalysis/historical feed.
///
/// Keyed by resort and date only; this series is not station-weighted.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HistoricalDailyWeather {
    pub date: NaiveDate,
    pub temp_min_f: Option<f64>,
    pub temp_max_f: Option<f64>,
    pub temp_avg_f: Option<f64>,
    pub precip_total_in: Option<f64>,
    /// Fresh snowfall for the day, in inches.
    pub snowfall_total_in: Option<f64>,
}
