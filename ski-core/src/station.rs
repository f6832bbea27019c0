use serde::{Deserialize, Serialize};

/// A SNOTEL measurement station.
///
/// Reference data only: location and elevation are carried for display and
/// are not used by the weather aggregation.
///
/// See: <https://www.nrcs.usda.gov/wps/portal/wcc/home/snowClimateMonitoring/snotel>
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// NRCS station triplet (e.g., "602:CO:SNTL")
    pub station_triplet: String,
    /// Human-readable name of the station
    pub station_name: String,
    /// Elevation of the station in feet
    pub elevation_ft: Option<i32>,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

/// Pairs a resort with one nearby station.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResortStationLink {
    pub resort_name: String,
    pub station_triplet: String,
    /// Straight-line distance from the resort to the station, in miles.
    pub distance_miles: f64,
}

/// A station as seen from a particular resort: identity plus distance.
///
/// This is the row shape returned by
/// [`ObservationStore::nearest_stations`](crate::ObservationStore::nearest_stations).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NearbyStation {
    pub station_triplet: String,
    pub station_name: String,
    pub distance_miles: f64,
}

impl NearbyStation {
    pub fn new(station_triplet: &str, station_name: &str, distance_miles: f64) -> Self {
        Self {
            station_triplet: station_triplet.to_string(),
            station_name: station_name.to_string(),
            distance_miles,
        }
    }
}
