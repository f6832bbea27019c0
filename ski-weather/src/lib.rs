//! Multi-station weather aggregation for ski resorts.
//!
//! Each resort is linked to its nearby SNOTEL stations. The nearest three
//! are weighted by inverse distance and their readings merged into daily and
//! hourly series, which then feed a snow-depth trend and a qualitative snow
//! conditions label. Historical snowfall and provider forecasts are read
//! alongside, keyed by resort.
//!
//! # Pipeline
//!
//! - [`weights`] - inverse-distance station weights
//! - [`daily`] / [`hourly`] - weighted merges with per-metric null handling
//! - [`trend`] - depth change, trend label and snow conditions
//! - [`summary`] / [`forecast`] - the resort-level operations on
//!   [`WeatherService`]
//! - [`status`] - lift and run status rolled up from daily snapshots
//!
//! Everything is recomputed from the store on each call; nothing is cached.
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ski_weather::{ResortAliases, WeatherService, WeatherWindow};
//! # use ski_core::*;
//! # struct Empty;
//! # impl ObservationStore for Empty {
//! #     fn nearest_stations(&self, _: &str, _: usize) -> anyhow::Result<Vec<NearbyStation>> { Ok(vec![]) }
//! #     fn station_observations(&self, _: &[String], _: NaiveDate, _: NaiveDate, _: Granularity) -> anyhow::Result<Vec<StationObservation>> { Ok(vec![]) }
//! #     fn historical_daily_weather(&self, _: &str, _: NaiveDate, _: NaiveDate) -> anyhow::Result<Vec<HistoricalDailyWeather>> { Ok(vec![]) }
//! #     fn forecasts(&self, _: &str, _: chrono::NaiveDateTime, _: chrono::NaiveDateTime) -> anyhow::Result<Vec<ForecastDataPoint>> { Ok(vec![]) }
//! #     fn station_resorts(&self) -> anyhow::Result<Vec<String>> { Ok(vec![]) }
//! #     fn forecast_resorts(&self, _: chrono::NaiveDateTime) -> anyhow::Result<Vec<String>> { Ok(vec![]) }
//! # }
//! # let store = Empty;
//!
//! let service = WeatherService::new(&store, ResortAliases::default());
//! let window = WeatherWindow::ending(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//!
//! // A resort without stations is "not found", not an empty summary
//! assert!(service.resort_weather("a-basin", window).unwrap().is_none());
//! ```

pub mod aliases;
pub mod daily;
pub mod forecast;
pub mod hourly;
pub mod mean;
pub mod status;
pub mod summary;
pub mod trend;
pub mod weights;
mod window;

pub use aliases::ResortAliases;
pub use daily::{DailyWeatherSummary, StationDailyData};
pub use forecast::ResortForecast;
pub use hourly::HourlyWeatherPoint;
pub use status::{
    GlobalRecentlyOpened, LiftStatus, OpenCount, OpenedAtResort, OperatingStatus, RecentlyOpened,
    ResortStatus, RunDifficulty, RunStatus, RunsByDifficulty,
};
pub use summary::{HourlyTemperaturePoint, ResortWeatherSummary, StationInfo};
pub use trend::{SnowConditions, SnowDepthTrend, WeatherTrend};
pub use window::WeatherWindow;

/// Entry point for the resort weather and forecast operations.
///
/// Holds a borrowed store and the alias table. The service carries no
/// mutable state, so one instance can serve any number of queries. Weather
/// operations need an [`ski_core::ObservationStore`], lift and run status a
/// [`ski_core::TerrainStore`].
pub struct WeatherService<'a, S> {
    store: &'a S,
    aliases: ResortAliases,
}

impl<'a, S> WeatherService<'a, S> {
    pub fn new(store: &'a S, aliases: ResortAliases) -> Self {
        Self { store, aliases }
    }

    pub fn aliases(&self) -> &ResortAliases {
        &self.aliases
    }
}
