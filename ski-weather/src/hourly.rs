//! Station-weighted hourly points.

use crate::mean::weighted_mean;
use crate::weights::StationWeights;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ski_core::StationObservation;
use ski_utils::rounding::round_opt;
use std::collections::BTreeMap;

/// Weighted readings for one resort at one `(date, hour)`.
///
/// `precip_accum_in` is the weighted raw counter value, not a delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeatherPoint {
    pub date: NaiveDate,
    pub hour: u32,
    pub snow_depth_in: Option<f64>,
    pub snow_water_equivalent_in: Option<f64>,
    pub temp_observed_f: Option<f64>,
    pub precip_accum_in: Option<f64>,
    pub wind_speed_avg_mph: Option<f64>,
    pub wind_speed_max_mph: Option<f64>,
}

/// Merge station readings into one weighted point per `(date, hour)`.
///
/// Same per-metric null handling as the daily path. Rows without an hour and
/// rows from stations outside `weights` are ignored. All metrics are rounded
/// to one decimal.
pub fn aggregate_hourly(
    weights: &StationWeights,
    observations: &[StationObservation],
) -> Vec<HourlyWeatherPoint> {
    let mut by_hour: BTreeMap<(NaiveDate, u32), Vec<(f64, &StationObservation)>> = BTreeMap::new();
    for obs in observations {
        let (Some(hour), Some(weight)) = (obs.hour, weights.weight(&obs.station_triplet)) else {
            continue;
        };
        by_hour.entry((obs.date, hour)).or_default().push((weight, obs));
    }

    by_hour
        .into_iter()
        .map(|((date, hour), samples)| {
            let metric = |f: fn(&StationObservation) -> Option<f64>| {
                round_opt(weighted_mean(samples.iter().copied(), f), 1)
            };
            HourlyWeatherPoint {
                date,
                hour,
                snow_depth_in: metric(|o| o.snow_depth_in),
                snow_water_equivalent_in: metric(|o| o.snow_water_equivalent_in),
                temp_observed_f: metric(|o| o.temp_observed_f),
                precip_accum_in: metric(|o| o.precip_accum_in),
                wind_speed_avg_mph: metric(|o| o.wind_speed_avg_mph),
                wind_speed_max_mph: metric(|o| o.wind_speed_max_mph),
            }
        })
        .collect()
}
