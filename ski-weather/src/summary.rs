//! Resort-level weather summaries.

use crate::daily::{aggregate_daily, overlay_snowfall, DailyWeatherSummary};
use crate::hourly::{aggregate_hourly, HourlyWeatherPoint};
use crate::trend::WeatherTrend;
use crate::weights::{StationWeights, MAX_STATIONS};
use crate::{WeatherService, WeatherWindow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ski_core::{Granularity, HistoricalDailyWeather, ObservationStore};

/// A station contributing to a resort summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub station_name: String,
    pub station_triplet: String,
    pub distance_miles: f64,
    /// Normalised inverse-distance weight.
    pub weight: f64,
}

/// Retired hourly temperature record; summaries always carry an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyTemperaturePoint {
    pub date: NaiveDate,
    pub hour: u32,
    pub temperature_f: Option<f64>,
    pub precipitation_in: Option<f64>,
    pub snowfall_in: Option<f64>,
}

/// Everything known about a resort's recent weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortWeatherSummary {
    /// Canonical resort name after alias resolution.
    pub resort_name: String,
    pub stations: Vec<StationInfo>,
    pub trend: WeatherTrend,
    pub daily_data: Vec<DailyWeatherSummary>,
    pub hourly_data: Vec<HourlyWeatherPoint>,
    pub hourly_temperature: Vec<HourlyTemperaturePoint>,
    pub historical_weather: Vec<HistoricalDailyWeather>,
}

impl<S: ObservationStore> WeatherService<'_, S> {
    /// Weather summary for one resort, or `None` when the resort has no
    /// linked stations.
    ///
    /// `resort_name` may be a nickname; see [`crate::ResortAliases`].
    pub fn resort_weather(
        &self,
        resort_name: &str,
        window: WeatherWindow,
    ) -> anyhow::Result<Option<ResortWeatherSummary>> {
        self.weather_for_canonical(&self.aliases.resolve(resort_name), window)
    }

    /// Summaries for every resort with station links, in resort name order.
    ///
    /// Resorts that resolve to no data are left out. Names come from the
    /// store and are used as they are, without alias lookup.
    pub fn all_resort_weather(&self, window: WeatherWindow) -> anyhow::Result<Vec<ResortWeatherSummary>> {
        let resorts = self.store.station_resorts()?;
        let mut summaries = Vec::with_capacity(resorts.len());
        for resort in &resorts {
            if let Some(summary) = self.weather_for_canonical(resort, window)? {
                summaries.push(summary);
            }
        }
        log::info!(
            "[SKI] weather: {} of {} resorts summarised",
            summaries.len(),
            resorts.len()
        );
        Ok(summaries)
    }

    fn weather_for_canonical(
        &self,
        resort: &str,
        window: WeatherWindow,
    ) -> anyhow::Result<Option<ResortWeatherSummary>> {
        let nearby = self.store.nearest_stations(resort, MAX_STATIONS)?;
        let weights = StationWeights::inverse_distance(&nearby);
        if weights.is_empty() {
            log::info!("[SKI] weather: no stations linked to '{}'", resort);
            return Ok(None);
        }

        let (start, end) = (window.history_start(), window.history_end());
        let triplets = weights.triplets();

        let daily_rows = self
            .store
            .station_observations(&triplets, start, end, Granularity::Daily)?;
        let mut daily_data = aggregate_daily(&weights, &daily_rows);

        let hourly_rows = self
            .store
            .station_observations(&triplets, start, end, Granularity::Hourly)?;
        let hourly_data = aggregate_hourly(&weights, &hourly_rows);

        let historical_weather = self.store.historical_daily_weather(resort, start, end)?;
        overlay_snowfall(&mut daily_data, &historical_weather);

        let trend = WeatherTrend::from_daily(&daily_data);
        log::info!(
            "[SKI] weather: '{}' from {} stations, {} days, {} hours, trend {} ({})",
            resort,
            weights.len(),
            daily_data.len(),
            hourly_data.len(),
            trend.snow_depth_trend,
            trend.snow_conditions
        );

        let stations = weights
            .stations()
            .iter()
            .map(|ws| StationInfo {
                station_name: ws.station.station_name.clone(),
                station_triplet: ws.station.station_triplet.clone(),
                distance_miles: ws.station.distance_miles,
                weight: ws.weight,
            })
            .collect();

        Ok(Some(ResortWeatherSummary {
            resort_name: resort.to_string(),
            stations,
            trend,
            daily_data,
            hourly_data,
            hourly_temperature: Vec::new(),
            historical_weather,
        }))
    }
}
