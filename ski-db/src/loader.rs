//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Each loader method parses CSV data from a string slice and upserts rows
//! into the corresponding table. All formats carry a header row; columns are
//! read by position.
//!
//! # CSV Formats
//!
//! - **Stations**: `station_triplet,station_name,elevation_ft,latitude,longitude`
//! - **Resort stations**: `resort_name,station_triplet,distance_miles`
//! - **Observations**: `station_triplet,date,hour,snow_depth_in,snow_water_equivalent_in,temp_min_f,temp_max_f,temp_avg_f,temp_observed_f,precip_accum_in,precip_increment_in,wind_speed_avg_mph,wind_speed_max_mph,wind_direction_avg_deg`
//! - **Historical weather**: `resort_name,date,temp_min_f,temp_max_f,temp_avg_f,precip_total_in,snowfall_total_in`
//! - **Forecasts**: `resort_name,source,forecast_time,valid_time,temp_high_f,temp_low_f,snow_amount_in,precip_amount_in,precip_prob_pct,wind_speed_mph,wind_direction_deg,wind_gust_mph,conditions_text,icon_code`
//! - **Lifts**: `resort_name,lift_name,lift_type,lift_status,updated_date`
//! - **Runs**: `resort_name,run_name,run_difficulty,run_status,run_area,run_groomed,updated_date`
//!
//! Blank or non-numeric metric cells are stored as NULL. Rows with a missing
//! or malformed key (station, resort, date, timestamp) are skipped.

use crate::Database;
use csv::StringRecord;
use rusqlite::params;
use ski_core::{ResortStationLink, Station};
use ski_utils::dates::{format_date, format_date_time, parse_date, parse_date_time};

impl Database {
    /// Load station metadata from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// station_triplet,station_name,elevation_ft,latitude,longitude
    /// 602:CO:SNTL,Grizzly Peak,11100,39.65,-105.87
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let Some(station) = parse_station(&r) else {
                skipped += 1;
                continue;
            };

            conn.execute(
                "INSERT OR REPLACE INTO snotel_stations
                 (station_triplet, station_name, elevation_ft, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    station.station_triplet,
                    station.station_name,
                    station.elevation_ft,
                    station.latitude,
                    station.longitude
                ],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} stations, skipped {}", count, skipped);
        Ok(())
    }

    /// Load resort to station links from CSV string.
    ///
    /// Rows with a missing, non-numeric or negative distance are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// resort_name,station_triplet,distance_miles
    /// Arapahoe Basin,602:CO:SNTL,1.0
    /// ```
    pub fn load_resort_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let Some(link) = parse_link(&r) else {
                skipped += 1;
                continue;
            };

            conn.execute(
                "INSERT OR REPLACE INTO resort_station_mapping
                 (resort_name, station_triplet, distance_miles)
                 VALUES (?1, ?2, ?3)",
                params![link.resort_name, link.station_triplet, link.distance_miles],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} resort station links, skipped {}", count, skipped);
        Ok(())
    }

    /// Load station observations from CSV string.
    ///
    /// An empty `hour` column marks a daily-only reading. Hours outside 0-23
    /// cause the row to be skipped.
    ///
    /// # Example CSV
    /// ```text
    /// station_triplet,date,hour,snow_depth_in,snow_water_equivalent_in,temp_min_f,temp_max_f,temp_avg_f,temp_observed_f,precip_accum_in,precip_increment_in,wind_speed_avg_mph,wind_speed_max_mph,wind_direction_avg_deg
    /// 602:CO:SNTL,2024-01-15,6,40,10.2,,,,18.5,10.0,,5.5,12.0,270
    /// 602:CO:SNTL,2024-01-15,,41,,12,25,,,,,,,
    /// ```
    pub fn load_observations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let triplet = text(&r, 0);
            let date = match parse_date(text(&r, 1)) {
                Ok(d) => format_date(&d),
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let hour = match text(&r, 2) {
                "" => None,
                s => match s.parse::<u32>() {
                    Ok(h) if h < 24 => Some(h),
                    _ => {
                        skipped += 1;
                        continue;
                    }
                },
            };
            if triplet.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO snotel_observations
                 (station_triplet, observation_date, observation_hour,
                  snow_depth_in, snow_water_equivalent_in,
                  temp_min_f, temp_max_f, temp_avg_f, temp_observed_f,
                  precip_accum_in, precip_increment_in,
                  wind_speed_avg_mph, wind_speed_max_mph, wind_direction_avg_deg)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    triplet,
                    date,
                    hour,
                    opt_f64(&r, 3),
                    opt_f64(&r, 4),
                    opt_f64(&r, 5),
                    opt_f64(&r, 6),
                    opt_f64(&r, 7),
                    opt_f64(&r, 8),
                    opt_f64(&r, 9),
                    opt_f64(&r, 10),
                    opt_f64(&r, 11),
                    opt_f64(&r, 12),
                    opt_f64(&r, 13),
                ],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} observations, skipped {} invalid", count, skipped);
        Ok(())
    }

    /// Load daily historical weather from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// resort_name,date,temp_min_f,temp_max_f,temp_avg_f,precip_total_in,snowfall_total_in
    /// Arapahoe Basin,2024-01-15,8.2,24.9,16.0,0.35,4.1
    /// ```
    pub fn load_historical_weather(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let resort = text(&r, 0);
            let date = match parse_date(text(&r, 1)) {
                Ok(d) => format_date(&d),
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if resort.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO historical_weather_daily
                 (resort_name, observation_date, temp_min_f, temp_max_f, temp_avg_f,
                  precip_total_in, snowfall_total_in)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    resort,
                    date,
                    opt_f64(&r, 2),
                    opt_f64(&r, 3),
                    opt_f64(&r, 4),
                    opt_f64(&r, 5),
                    opt_f64(&r, 6),
                ],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} historical weather days, skipped {}", count, skipped);
        Ok(())
    }

    /// Load forecast rows from CSV string.
    ///
    /// Timestamps may be written as `YYYY-MM-DD HH:MM[:SS]`,
    /// `YYYY-MM-DDTHH:MM[:SS]` or a bare date.
    ///
    /// # Example CSV
    /// ```text
    /// resort_name,source,forecast_time,valid_time,temp_high_f,temp_low_f,snow_amount_in,precip_amount_in,precip_prob_pct,wind_speed_mph,wind_direction_deg,wind_gust_mph,conditions_text,icon_code
    /// Vail,OPEN_METEO,2024-01-15T00:00,2024-01-16,28,9,4.5,0.4,80,15,270,30,Heavy snow,snow
    /// ```
    pub fn load_forecasts(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let resort = text(&r, 0);
            let source = text(&r, 1);
            let (forecast_time, valid_time) =
                match (parse_date_time(text(&r, 2)), parse_date_time(text(&r, 3))) {
                    (Ok(f), Ok(v)) => (format_date_time(&f), format_date_time(&v)),
                    _ => {
                        skipped += 1;
                        continue;
                    }
                };
            if resort.is_empty() || source.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO weather_forecasts
                 (resort_name, source, forecast_time, valid_time,
                  temp_high_f, temp_low_f, snow_amount_in, precip_amount_in, precip_prob_pct,
                  wind_speed_mph, wind_direction_deg, wind_gust_mph, conditions_text, icon_code)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    resort,
                    source,
                    forecast_time,
                    valid_time,
                    opt_f64(&r, 4),
                    opt_f64(&r, 5),
                    opt_f64(&r, 6),
                    opt_f64(&r, 7),
                    opt_i64(&r, 8),
                    opt_f64(&r, 9),
                    opt_i64(&r, 10),
                    opt_f64(&r, 11),
                    opt_text(&r, 12),
                    opt_text(&r, 13),
                ],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} forecasts, skipped {}", count, skipped);
        Ok(())
    }

    /// Load lift status snapshots from CSV string.
    ///
    /// `lift_status` is open for `open`, `true`, `1` or `yes` in any case;
    /// anything else is closed.
    ///
    /// # Example CSV
    /// ```text
    /// resort_name,lift_name,lift_type,lift_status,updated_date
    /// Loveland,Chair 1,Triple,Open,2024-01-15
    /// ```
    pub fn load_lifts(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let resort = text(&r, 0);
            let lift = text(&r, 1);
            let date = match parse_date(text(&r, 4)) {
                Ok(d) => format_date(&d),
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if resort.is_empty() || lift.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO lifts
                 (resort_name, lift_name, lift_type, is_open, updated_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![resort, lift, opt_text(&r, 2), flag(&r, 3), date],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} lift snapshots, skipped {}", count, skipped);
        Ok(())
    }

    /// Load run status snapshots from CSV string.
    ///
    /// `run_status` and `run_groomed` use the same truthy values as lift
    /// status.
    ///
    /// # Example CSV
    /// ```text
    /// resort_name,run_name,run_difficulty,run_status,run_area,run_groomed,updated_date
    /// Loveland,Mambo,Most Difficult,Open,Loveland Basin,true,2024-01-15
    /// ```
    pub fn load_runs(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let resort = text(&r, 0);
            let run = text(&r, 1);
            let date = match parse_date(text(&r, 6)) {
                Ok(d) => format_date(&d),
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            if resort.is_empty() || run.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO runs
                 (resort_name, run_name, run_difficulty, is_open, run_area, run_groomed, updated_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    resort,
                    run,
                    opt_text(&r, 2),
                    flag(&r, 3),
                    opt_text(&r, 4),
                    flag(&r, 5),
                    date
                ],
            )?;
            count += 1;
        }
        log::info!("[SKI] loader: Loaded {} run snapshots, skipped {}", count, skipped);
        Ok(())
    }
}

// ───────────────────── Helper Functions ─────────────────────

/// A station row, or `None` without a triplet and name.
fn parse_station(r: &StringRecord) -> Option<Station> {
    let (triplet, name) = (text(r, 0), text(r, 1));
    if triplet.is_empty() || name.is_empty() {
        return None;
    }
    Some(Station {
        station_triplet: triplet.to_string(),
        station_name: name.to_string(),
        elevation_ft: opt_i64(r, 2).and_then(|e| i32::try_from(e).ok()),
        latitude: opt_f64(r, 3),
        longitude: opt_f64(r, 4),
    })
}

/// A resort link row, or `None` when a key is blank or the distance is
/// missing or negative.
fn parse_link(r: &StringRecord) -> Option<ResortStationLink> {
    let (resort, triplet) = (text(r, 0), text(r, 1));
    let distance = opt_f64(r, 2).filter(|d| *d >= 0.0)?;
    if resort.is_empty() || triplet.is_empty() {
        return None;
    }
    Some(ResortStationLink {
        resort_name: resort.to_string(),
        station_triplet: triplet.to_string(),
        distance_miles: distance,
    })
}

fn reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes())
}

fn text(r: &StringRecord, idx: usize) -> &str {
    r.get(idx).unwrap_or("").trim()
}

fn opt_text(r: &StringRecord, idx: usize) -> Option<String> {
    Some(text(r, idx)).filter(|s| !s.is_empty()).map(str::to_string)
}

fn opt_f64(r: &StringRecord, idx: usize) -> Option<f64> {
    text(r, idx).parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Open/closed and yes/no cells; unrecognised values read as false.
fn flag(r: &StringRecord, idx: usize) -> bool {
    matches!(
        text(r, idx).to_lowercase().as_str(),
        "open" | "true" | "1" | "yes"
    )
}

/// Integer cell; a float such as `80.0` is accepted and rounded.
fn opt_i64(r: &StringRecord, idx: usize) -> Option<i64> {
    let s = text(r, idx);
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.round() as i64))
}
