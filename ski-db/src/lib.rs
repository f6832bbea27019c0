//! In-memory SQLite observation store for ski resort weather data.
//!
//! This crate loads CSV fixtures into an in-memory SQLite database and
//! implements [`ski_core::ObservationStore`] and [`ski_core::TerrainStore`]
//! on top of it, so the weather and lift status operations can be run
//! against local data without a database server.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability; the store is
//!   single-threaded and cheap to clone
//! - In-memory SQLite via `rusqlite`
//! - CSV data loaded via the `load_*` methods
//! - Query contracts implemented in the `queries` module
//!
//! # Usage
//!
//! ```rust
//! use ski_core::ObservationStore;
//! use ski_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("station_triplet,station_name,elevation_ft,latitude,longitude\n602:CO:SNTL,Grizzly Peak,11100,39.65,-105.87\n").unwrap();
//! db.load_resort_stations("resort_name,station_triplet,distance_miles\nArapahoe Basin,602:CO:SNTL,1.0\n").unwrap();
//!
//! let stations = db.nearest_stations("Arapahoe Basin", 3).unwrap();
//! assert_eq!(stations.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.

pub mod schema;
mod loader;
mod queries;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding station, weather, forecast and lift/run data.
///
/// This struct is cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ski_core::ObservationStore;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_resort_stations("resort_name,station_triplet,distance_miles\nVail,1,2.0\n")
            .unwrap();
        let resorts = db2.station_resorts().unwrap();
        assert_eq!(resorts.len(), 1, "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.station_resorts().unwrap().is_empty());
    }
}
