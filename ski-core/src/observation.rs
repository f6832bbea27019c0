use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single SNOTEL reading for one station.
///
/// `hour` is `None` for sources that only report once a day. Every metric is
/// optional: stations routinely drop individual sensors, and a missing value
/// must stay distinguishable from a zero reading.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct StationObservation {
    pub station_triplet: String,
    pub date: NaiveDate,
    /// Hour of day (0-23), absent for daily-only rows.
    pub hour: Option<u32>,
    /// Snow depth in inches
    pub snow_depth_in: Option<f64>,
    /// Snow water equivalent in inches
    pub snow_water_equivalent_in: Option<f64>,
    pub temp_min_f: Option<f64>,
    pub temp_max_f: Option<f64>,
    pub temp_avg_f: Option<f64>,
    pub temp_observed_f: Option<f64>,
    /// Cumulative precipitation counter in inches (resets once per water year).
    pub precip_accum_in: Option<f64>,
    /// Precipitation since the previous reading, in inches.
    pub precip_increment_in: Option<f64>,
    pub wind_speed_avg_mph: Option<f64>,
    pub wind_speed_max_mph: Option<f64>,
    /// Average wind direction in compass degrees (0-360).
    pub wind_direction_avg_deg: Option<f64>,
}

impl StationObservation {
    /// An observation with every metric empty.
    pub fn empty(station_triplet: &str, date: NaiveDate, hour: Option<u32>) -> Self {
        Self {
            station_triplet: station_triplet.to_string(),
            date,
            hour,
            ..Default::default()
        }
    }
}
