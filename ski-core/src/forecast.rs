use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One forecast value for a resort from one provider.
///
/// Several providers may forecast the same `valid_time`; they are never
/// merged.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ForecastDataPoint {
    /// Provider identifier (e.g., "OPEN_METEO", "NWS")
    pub source: String,
    /// When the forecast was issued
    pub forecast_time: NaiveDateTime,
    /// The time the forecast applies to
    pub valid_time: NaiveDateTime,
    pub temp_high_f: Option<f64>,
    pub temp_low_f: Option<f64>,
    pub snow_amount_in: Option<f64>,
    pub precip_amount_in: Option<f64>,
    /// Probability of precipitation, 0-100
    pub precip_prob_pct: Option<i32>,
    pub wind_speed_mph: Option<f64>,
    pub wind_direction_deg: Option<i32>,
    pub wind_gust_mph: Option<f64>,
    pub conditions_text: Option<String>,
    pub icon_code: Option<String>,
}
