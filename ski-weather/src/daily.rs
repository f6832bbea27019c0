//! Station-weighted daily summaries.
//!
//! Raw readings are first reduced per station and day ([`StationDay`]), then
//! the stations are merged per day with their inverse-distance weights.

use crate::mean::{circular_mean, mean, round_bearing, weighted_circular_mean, weighted_mean};
use crate::weights::StationWeights;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ski_core::{HistoricalDailyWeather, StationObservation};
use ski_utils::rounding::round_opt;
use std::collections::BTreeMap;

/// One station's readings for one day, reduced to daily statistics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationDay {
    pub station_triplet: String,
    pub date: NaiveDate,
    pub snow_depth_avg_in: Option<f64>,
    pub snow_depth_max_in: Option<f64>,
    pub temp_min_f: Option<f64>,
    pub temp_max_f: Option<f64>,
    /// Growth of the cumulative precipitation counter over the day.
    pub precip_total_in: Option<f64>,
    pub wind_speed_avg_mph: Option<f64>,
    pub wind_direction_avg_deg: Option<f64>,
}

impl StationDay {
    /// Reduce every reading a station made on `date`.
    ///
    /// Daily-only sources report `temp_min_f`/`temp_max_f` directly; hourly
    /// rows only carry `temp_observed_f`, which stands in for both.
    pub fn from_readings(station_triplet: &str, date: NaiveDate, readings: &[&StationObservation]) -> Self {
        let readings = readings.iter().copied();
        Self {
            station_triplet: station_triplet.to_string(),
            date,
            snow_depth_avg_in: mean(readings.clone(), |r| r.snow_depth_in),
            snow_depth_max_in: fold(readings.clone(), |r| r.snow_depth_in, f64::max),
            temp_min_f: fold(readings.clone(), |r| r.temp_min_f.or(r.temp_observed_f), f64::min),
            temp_max_f: fold(readings.clone(), |r| r.temp_max_f.or(r.temp_observed_f), f64::max),
            precip_total_in: counter_delta(readings.clone(), |r| r.precip_accum_in),
            wind_speed_avg_mph: mean(readings.clone(), |r| r.wind_speed_avg_mph),
            wind_direction_avg_deg: circular_mean(readings, |r| r.wind_direction_avg_deg),
        }
    }
}

/// Unweighted value of one contributing station, kept for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDailyData {
    pub station_name: String,
    pub station_triplet: String,
    pub distance_miles: f64,
    pub snow_depth_avg_in: Option<f64>,
}

/// Weighted weather for one resort and one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeatherSummary {
    pub date: NaiveDate,
    pub snow_depth_avg_in: Option<f64>,
    pub snow_depth_max_in: Option<f64>,
    pub temp_min_f: Option<f64>,
    pub temp_max_f: Option<f64>,
    pub precip_total_in: Option<f64>,
    /// Fresh snowfall from the historical weather feed, matched by date.
    pub snowfall_total_in: Option<f64>,
    pub wind_speed_avg_mph: Option<f64>,
    pub wind_direction_avg_deg: Option<i32>,
    /// Contributing stations, nearest first.
    pub station_data: Vec<StationDailyData>,
}

/// Merge station readings into one weighted summary per day.
///
/// Readings from stations that are not in `weights` are ignored. Each metric
/// is averaged over only the stations reporting it that day; a metric no
/// station reports is `None`. The result is in ascending date order with
/// `snowfall_total_in` unset (see [`overlay_snowfall`]).
pub fn aggregate_daily(
    weights: &StationWeights,
    observations: &[StationObservation],
) -> Vec<DailyWeatherSummary> {
    let mut by_date: BTreeMap<NaiveDate, BTreeMap<&str, Vec<&StationObservation>>> = BTreeMap::new();
    for obs in observations {
        if weights.weight(&obs.station_triplet).is_none() {
            continue;
        }
        by_date
            .entry(obs.date)
            .or_default()
            .entry(obs.station_triplet.as_str())
            .or_default()
            .push(obs);
    }

    by_date
        .into_iter()
        .map(|(date, by_station)| {
            // Nearest first, skipping stations silent on this date
            let days: Vec<(f64, StationDay, &ski_core::NearbyStation)> = weights
                .stations()
                .iter()
                .filter_map(|ws| {
                    by_station.get(ws.station.station_triplet.as_str()).map(|readings| {
                        let day = StationDay::from_readings(&ws.station.station_triplet, date, readings);
                        (ws.weight, day, &ws.station)
                    })
                })
                .collect();
            let samples = || days.iter().map(|(w, day, _)| (*w, day));

            DailyWeatherSummary {
                date,
                snow_depth_avg_in: round_opt(weighted_mean(samples(), |d| d.snow_depth_avg_in), 1),
                snow_depth_max_in: round_opt(weighted_mean(samples(), |d| d.snow_depth_max_in), 1),
                temp_min_f: round_opt(weighted_mean(samples(), |d| d.temp_min_f), 1),
                temp_max_f: round_opt(weighted_mean(samples(), |d| d.temp_max_f), 1),
                precip_total_in: round_opt(weighted_mean(samples(), |d| d.precip_total_in), 2),
                snowfall_total_in: None,
                wind_speed_avg_mph: round_opt(weighted_mean(samples(), |d| d.wind_speed_avg_mph), 1),
                wind_direction_avg_deg: weighted_circular_mean(samples(), |d| d.wind_direction_avg_deg)
                    .map(round_bearing),
                station_data: days
                    .iter()
                    .map(|(_, day, station)| StationDailyData {
                        station_name: station.station_name.clone(),
                        station_triplet: station.station_triplet.clone(),
                        distance_miles: station.distance_miles,
                        snow_depth_avg_in: day.snow_depth_avg_in,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Copy snowfall totals from the historical feed onto matching days.
///
/// Matching is by exact date. Historical days with no station summary are
/// dropped; a null historical snowfall leaves the day's value null.
pub fn overlay_snowfall(daily: &mut [DailyWeatherSummary], historical: &[HistoricalDailyWeather]) {
    let snowfall: BTreeMap<NaiveDate, Option<f64>> = historical
        .iter()
        .map(|h| (h.date, h.snowfall_total_in))
        .collect();
    for day in daily.iter_mut() {
        if let Some(total) = snowfall.get(&day.date) {
            day.snowfall_total_in = round_opt(*total, 2);
        }
    }
}

// ───────────────────── Helper Functions ─────────────────────

fn fold<'a>(
    readings: impl Iterator<Item = &'a StationObservation>,
    metric: impl Fn(&StationObservation) -> Option<f64>,
    pick: fn(f64, f64) -> f64,
) -> Option<f64> {
    readings.filter_map(metric).reduce(pick)
}

/// `max - min` of a cumulative counter within one day.
fn counter_delta<'a>(
    readings: impl Iterator<Item = &'a StationObservation> + Clone,
    metric: impl Fn(&StationObservation) -> Option<f64> + Copy,
) -> Option<f64> {
    let high = fold(readings.clone(), metric, f64::max)?;
    let low = fold(readings, metric, f64::min)?;
    Some(high - low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ski_core::NearbyStation;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn two_stations() -> StationWeights {
        StationWeights::inverse_distance(&[
            NearbyStation::new("A", "Station A", 1.0),
            NearbyStation::new("B", "Station B", 4.0),
        ])
    }

    fn reading(station: &str, day: u32, hour: Option<u32>) -> StationObservation {
        StationObservation::empty(station, date(day), hour)
    }

    fn depth(station: &str, day: u32, snow: f64) -> StationObservation {
        StationObservation {
            snow_depth_in: Some(snow),
            ..reading(station, day, Some(0))
        }
    }

    #[test]
    fn test_weighted_snow_depth() {
        let daily = aggregate_daily(&two_stations(), &[depth("A", 15, 40.0), depth("B", 15, 20.0)]);
        assert_eq!(daily.len(), 1);
        // 40 * 4.1/5.2 + 20 * 1.1/5.2 = 35.769...
        assert_eq!(daily[0].snow_depth_avg_in, Some(35.8));
        assert_eq!(daily[0].snow_depth_max_in, Some(35.8));
    }

    #[test]
    fn test_dates_are_ascending() {
        let obs = [depth("A", 16, 42.0), depth("B", 15, 20.0), depth("A", 14, 38.0)];
        let daily = aggregate_daily(&two_stations(), &obs);
        let dates: Vec<NaiveDate> = daily.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(14), date(15), date(16)]);
    }

    #[test]
    fn test_metric_missing_everywhere_is_null() {
        let daily = aggregate_daily(&two_stations(), &[depth("A", 15, 40.0), depth("B", 15, 20.0)]);
        assert_eq!(daily[0].temp_min_f, None);
        assert_eq!(daily[0].precip_total_in, None);
        assert_eq!(daily[0].wind_direction_avg_deg, None);
    }

    #[test]
    fn test_per_metric_station_exclusion() {
        // A reports only snow, B reports only temperature
        let a = depth("A", 15, 40.0);
        let b = StationObservation {
            temp_observed_f: Some(21.0),
            ..reading("B", 15, Some(0))
        };
        let daily = aggregate_daily(&two_stations(), &[a, b]);
        assert_eq!(daily[0].snow_depth_avg_in, Some(40.0));
        assert_eq!(daily[0].temp_min_f, Some(21.0));
        assert_eq!(daily[0].temp_max_f, Some(21.0));
    }

    #[test]
    fn test_precip_from_cumulative_counter() {
        let weights = StationWeights::inverse_distance(&[NearbyStation::new("A", "Station A", 2.0)]);
        let obs: Vec<StationObservation> = [(0, 10.0), (1, 10.5), (2, 11.2)]
            .iter()
            .map(|(hour, accum)| StationObservation {
                precip_accum_in: Some(*accum),
                ..reading("A", 15, Some(*hour))
            })
            .collect();
        let daily = aggregate_daily(&weights, &obs);
        assert_eq!(daily[0].precip_total_in, Some(1.2));
    }

    #[test]
    fn test_station_day_reduction() {
        let rows = [
            StationObservation {
                snow_depth_in: Some(30.0),
                temp_observed_f: Some(12.0),
                wind_speed_avg_mph: Some(4.0),
                wind_direction_avg_deg: Some(350.0),
                precip_accum_in: Some(5.0),
                ..reading("A", 15, Some(6))
            },
            StationObservation {
                snow_depth_in: Some(34.0),
                temp_observed_f: Some(25.0),
                wind_speed_avg_mph: Some(8.0),
                wind_direction_avg_deg: Some(10.0),
                ..reading("A", 15, Some(12))
            },
        ];
        let refs: Vec<&StationObservation> = rows.iter().collect();
        let day = StationDay::from_readings("A", date(15), &refs);
        assert_eq!(day.snow_depth_avg_in, Some(32.0));
        assert_eq!(day.snow_depth_max_in, Some(34.0));
        assert_eq!(day.temp_min_f, Some(12.0));
        assert_eq!(day.temp_max_f, Some(25.0));
        assert_eq!(day.wind_speed_avg_mph, Some(6.0));
        // A single counter reading yields no growth
        assert_eq!(day.precip_total_in, Some(0.0));
        assert_eq!(round_bearing(day.wind_direction_avg_deg.unwrap()), 0);
    }

    #[test]
    fn test_daily_only_temperatures_are_used() {
        let row = StationObservation {
            temp_min_f: Some(3.0),
            temp_max_f: Some(28.0),
            temp_observed_f: Some(15.0),
            ..reading("A", 15, None)
        };
        let day = StationDay::from_readings("A", date(15), &[&row]);
        assert_eq!(day.temp_min_f, Some(3.0));
        assert_eq!(day.temp_max_f, Some(28.0));
    }

    #[test]
    fn test_wind_direction_is_circular() {
        let a = StationObservation {
            wind_direction_avg_deg: Some(350.0),
            ..reading("A", 15, Some(0))
        };
        let b = StationObservation {
            wind_direction_avg_deg: Some(10.0),
            ..reading("B", 15, Some(0))
        };
        let daily = aggregate_daily(&two_stations(), &[a, b]);
        assert_eq!(daily[0].wind_direction_avg_deg, Some(354));
    }

    #[test]
    fn test_station_data_keeps_raw_values() {
        let obs = [depth("B", 15, 20.0), depth("A", 15, 40.0), depth("A", 15, 41.0)];
        let daily = aggregate_daily(&two_stations(), &obs);
        let data = &daily[0].station_data;
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].station_triplet, "A");
        assert_eq!(data[0].snow_depth_avg_in, Some(40.5));
        assert_eq!(data[1].station_name, "Station B");
        assert!((data[1].distance_miles - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unweighted_station_is_ignored() {
        let daily = aggregate_daily(&two_stations(), &[depth("Z", 15, 99.0)]);
        assert!(daily.is_empty());
    }

    #[test]
    fn test_overlay_snowfall_by_exact_date() {
        let mut daily = aggregate_daily(&two_stations(), &[depth("A", 14, 40.0), depth("A", 15, 41.0)]);
        let historical = vec![
            HistoricalDailyWeather {
                date: date(14),
                temp_min_f: None,
                temp_max_f: None,
                temp_avg_f: None,
                precip_total_in: None,
                snowfall_total_in: Some(3.456),
            },
            HistoricalDailyWeather {
                date: date(20),
                temp_min_f: None,
                temp_max_f: None,
                temp_avg_f: None,
                precip_total_in: None,
                snowfall_total_in: Some(9.0),
            },
        ];
        overlay_snowfall(&mut daily, &historical);
        assert_eq!(daily.len(), 2, "Historical-only dates are not added");
        assert_eq!(daily[0].snowfall_total_in, Some(3.46));
        assert_eq!(daily[1].snowfall_total_in, None);
    }
}
