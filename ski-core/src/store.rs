//! The read contract between the weather core and whatever holds the data.
//!
//! Implementations own connection handling. Any `Err` they return means the
//! store could not be read and is propagated to the caller unchanged.

use crate::{ForecastDataPoint, HistoricalDailyWeather, NearbyStation, StationObservation};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Row selection for [`ObservationStore::station_observations`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// Every row in the window, hourly and daily-only alike.
    Daily,
    /// Only rows that carry an hour, ordered by `(date, hour, station)`.
    Hourly,
}

pub trait ObservationStore {
    /// Stations linked to `resort_name`, nearest first, at most `limit`.
    fn nearest_stations(
        &self,
        resort_name: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<NearbyStation>>;

    /// Observations for the given stations with `start <= date <= end`.
    fn station_observations(
        &self,
        station_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> anyhow::Result<Vec<StationObservation>>;

    /// Daily historical weather for a resort with `start <= date <= end`,
    /// ascending by date.
    fn historical_daily_weather(
        &self,
        resort_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<HistoricalDailyWeather>>;

    /// Forecasts for a resort with `valid_from <= valid_time <= valid_to`,
    /// ordered by `(source, valid_time)`.
    fn forecasts(
        &self,
        resort_name: &str,
        valid_from: NaiveDateTime,
        valid_to: NaiveDateTime,
    ) -> anyhow::Result<Vec<ForecastDataPoint>>;

    /// Distinct resort names that have at least one station link, ascending.
    fn station_resorts(&self) -> anyhow::Result<Vec<String>>;

    /// Distinct resort names with a forecast valid at or after `valid_from`,
    /// ascending.
    fn forecast_resorts(&self, valid_from: NaiveDateTime) -> anyhow::Result<Vec<String>>;
}
