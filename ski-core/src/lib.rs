pub mod forecast;
pub mod historical;
pub mod observation;
pub mod station;
pub mod store;
pub mod terrain;

pub use forecast::ForecastDataPoint;
pub use historical::HistoricalDailyWeather;
pub use observation::StationObservation;
pub use station::{NearbyStation, ResortStationLink, Station};
pub use store::{Granularity, ObservationStore};
pub use terrain::{LiftSnapshot, RunSnapshot, TerrainStore};
