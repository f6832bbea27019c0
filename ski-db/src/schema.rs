//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.
//! Dates are stored as `YYYY-MM-DD` text and timestamps as
//! `YYYY-MM-DD HH:MM:SS` text so that string comparison orders them.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// **Station tables:**
/// - `snotel_stations` - Station metadata (triplet, name, elevation, lat/lon)
/// - `resort_station_mapping` - Resort to station links with distance in miles
/// - `snotel_observations` - Hourly and daily-only station readings
///
/// **Resort tables:**
/// - `historical_weather_daily` - Daily historical weather per resort
/// - `weather_forecasts` - Forecast rows per resort, provider and valid time
///
/// **Terrain tables:**
/// - `lifts` - Lift open/closed snapshots per resort and date
/// - `runs` - Run open/closed snapshots with difficulty, area and grooming
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS snotel_stations (
        station_triplet TEXT PRIMARY KEY,
        station_name TEXT NOT NULL,
        elevation_ft INTEGER,
        latitude REAL,
        longitude REAL
    );

    CREATE TABLE IF NOT EXISTS resort_station_mapping (
        resort_name TEXT NOT NULL,
        station_triplet TEXT NOT NULL,
        distance_miles REAL NOT NULL,
        PRIMARY KEY (resort_name, station_triplet)
    );
    CREATE INDEX IF NOT EXISTS idx_rsm_resort ON resort_station_mapping(resort_name);

    CREATE TABLE IF NOT EXISTS snotel_observations (
        station_triplet TEXT NOT NULL,
        observation_date TEXT NOT NULL,
        observation_hour INTEGER,
        snow_depth_in REAL,
        snow_water_equivalent_in REAL,
        temp_min_f REAL,
        temp_max_f REAL,
        temp_avg_f REAL,
        temp_observed_f REAL,
        precip_accum_in REAL,
        precip_increment_in REAL,
        wind_speed_avg_mph REAL,
        wind_speed_max_mph REAL,
        wind_direction_avg_deg REAL
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_snotel_obs_key
        ON snotel_observations(station_triplet, observation_date, COALESCE(observation_hour, -1));
    CREATE INDEX IF NOT EXISTS idx_snotel_obs_date ON snotel_observations(observation_date);

    CREATE TABLE IF NOT EXISTS historical_weather_daily (
        resort_name TEXT NOT NULL,
        observation_date TEXT NOT NULL,
        temp_min_f REAL,
        temp_max_f REAL,
        temp_avg_f REAL,
        precip_total_in REAL,
        snowfall_total_in REAL,
        PRIMARY KEY (resort_name, observation_date)
    );

    CREATE TABLE IF NOT EXISTS weather_forecasts (
        resort_name TEXT NOT NULL,
        source TEXT NOT NULL,
        forecast_time TEXT NOT NULL,
        valid_time TEXT NOT NULL,
        temp_high_f REAL,
        temp_low_f REAL,
        snow_amount_in REAL,
        precip_amount_in REAL,
        precip_prob_pct INTEGER,
        wind_speed_mph REAL,
        wind_direction_deg INTEGER,
        wind_gust_mph REAL,
        conditions_text TEXT,
        icon_code TEXT,
        PRIMARY KEY (resort_name, source, valid_time)
    );
    CREATE INDEX IF NOT EXISTS idx_forecast_valid ON weather_forecasts(valid_time);

    CREATE TABLE IF NOT EXISTS lifts (
        resort_name TEXT NOT NULL,
        lift_name TEXT NOT NULL,
        lift_type TEXT,
        is_open INTEGER NOT NULL,
        updated_date TEXT NOT NULL,
        PRIMARY KEY (resort_name, lift_name, updated_date)
    );

    CREATE TABLE IF NOT EXISTS runs (
        resort_name TEXT NOT NULL,
        run_name TEXT NOT NULL,
        run_difficulty TEXT,
        is_open INTEGER NOT NULL,
        run_area TEXT,
        run_groomed INTEGER NOT NULL DEFAULT 0,
        updated_date TEXT NOT NULL,
        PRIMARY KEY (resort_name, run_name, updated_date)
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let expected_tables = [
            "snotel_stations",
            "resort_station_mapping",
            "snotel_observations",
            "historical_weather_daily",
            "weather_forecasts",
            "lifts",
            "runs",
        ];

        for table in &expected_tables {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_creates_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let expected_indexes = [
            "idx_rsm_resort",
            "idx_snotel_obs_key",
            "idx_snotel_obs_date",
            "idx_forecast_valid",
        ];

        for idx in &expected_indexes {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?1",
                    [idx],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Index '{}' should exist", idx);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }

    #[test]
    fn observation_key_treats_missing_hour_as_one_slot() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        for depth in [30.0, 31.0] {
            conn.execute(
                "INSERT OR REPLACE INTO snotel_observations
                 (station_triplet, observation_date, observation_hour, snow_depth_in)
                 VALUES ('602:CO:SNTL', '2024-01-15', NULL, ?1)",
                [depth],
            )
            .unwrap();
        }
        let (count, depth): (i64, f64) = conn
            .query_row(
                "SELECT COUNT(*), MAX(snow_depth_in) FROM snotel_observations",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(count, 1, "Daily-only rows should upsert on (station, date)");
        assert!((depth - 31.0).abs() < f64::EPSILON);
    }
}
