//! Resort forecasts, passed through per provider.

use crate::{WeatherService, WeatherWindow};
use serde::{Deserialize, Serialize};
use ski_core::{ForecastDataPoint, ObservationStore};

/// All providers' forecasts for one resort, ordered by `(source, valid_time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortForecast {
    pub resort_name: String,
    pub forecasts: Vec<ForecastDataPoint>,
}

impl<S: ObservationStore> WeatherService<'_, S> {
    /// Forecasts valid within the window, or `None` when there are none.
    pub fn resort_forecast(
        &self,
        resort_name: &str,
        window: WeatherWindow,
    ) -> anyhow::Result<Option<ResortForecast>> {
        self.forecast_for_canonical(&self.aliases.resolve(resort_name), window)
    }

    /// Forecasts for every resort with a forecast valid from today on.
    ///
    /// Store resort names are used as they are, without alias lookup.
    pub fn all_resort_forecasts(&self, window: WeatherWindow) -> anyhow::Result<Vec<ResortForecast>> {
        let resorts = self.store.forecast_resorts(window.forecast_start())?;
        let mut all = Vec::with_capacity(resorts.len());
        for resort in &resorts {
            if let Some(forecast) = self.forecast_for_canonical(resort, window)? {
                all.push(forecast);
            }
        }
        Ok(all)
    }

    fn forecast_for_canonical(
        &self,
        resort: &str,
        window: WeatherWindow,
    ) -> anyhow::Result<Option<ResortForecast>> {
        let forecasts = self
            .store
            .forecasts(resort, window.forecast_start(), window.forecast_end())?;
        if forecasts.is_empty() {
            log::info!("[SKI] forecast: no forecasts for '{}'", resort);
            return Ok(None);
        }
        log::info!("[SKI] forecast: '{}' has {} forecast rows", resort, forecasts.len());
        Ok(Some(ResortForecast {
            resort_name: resort.to_string(),
            forecasts,
        }))
    }
}
