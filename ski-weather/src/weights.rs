//! Inverse-distance weighting of a resort's nearby stations.

use ski_core::NearbyStation;

/// Added to every distance so a station sitting on the resort doesn't take
/// all of the weight (or divide by zero).
pub const DISTANCE_EPSILON_MILES: f64 = 0.1;

/// Only this many of the nearest stations contribute to a resort.
pub const MAX_STATIONS: usize = 3;

/// A contributing station and its normalised weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedStation {
    pub station: NearbyStation,
    pub weight: f64,
}

/// Normalised weights for the stations of one resort, nearest first.
///
/// Weights are in `(0, 1]` and sum to 1 whenever at least one station is
/// present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationWeights {
    stations: Vec<WeightedStation>,
}

impl StationWeights {
    /// Weight each station by `1 / (distance + ε)` and normalise.
    ///
    /// The input does not need to be sorted; it is ordered by ascending
    /// distance (ties keep their input order) and cut to the nearest
    /// [`MAX_STATIONS`]. Stations with a non-finite distance are ignored.
    ///
    /// ```rust
    /// use ski_core::NearbyStation;
    /// use ski_weather::weights::StationWeights;
    ///
    /// let weights = StationWeights::inverse_distance(&[
    ///     NearbyStation::new("A", "Near", 1.0),
    ///     NearbyStation::new("B", "Far", 4.0),
    /// ]);
    /// assert!((weights.weight("A").unwrap() - 4.1 / 5.2).abs() < 1e-12);
    /// ```
    pub fn inverse_distance(stations: &[NearbyStation]) -> Self {
        let mut nearest: Vec<&NearbyStation> = stations
            .iter()
            .filter(|s| s.distance_miles.is_finite())
            .collect();
        nearest.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
        nearest.truncate(MAX_STATIONS);

        let raw: Vec<f64> = nearest
            .iter()
            .map(|s| 1.0 / (s.distance_miles.max(0.0) + DISTANCE_EPSILON_MILES))
            .collect();
        let total: f64 = raw.iter().sum();

        let stations = nearest
            .into_iter()
            .zip(raw)
            .map(|(station, w)| WeightedStation {
                station: station.clone(),
                weight: w / total,
            })
            .collect();
        Self { stations }
    }

    /// Weight of a station, or `None` if it does not contribute.
    pub fn weight(&self, station_triplet: &str) -> Option<f64> {
        self.stations
            .iter()
            .find(|s| s.station.station_triplet == station_triplet)
            .map(|s| s.weight)
    }

    pub fn stations(&self) -> &[WeightedStation] {
        &self.stations
    }

    pub fn triplets(&self) -> Vec<String> {
        self.stations
            .iter()
            .map(|s| s.station.station_triplet.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }
}
