//! [`ObservationStore`] and [`TerrainStore`] implementations backed by the
//! SQLite tables.
//!
//! Date bounds are inclusive on both ends. Because dates and timestamps are
//! stored as zero-padded ISO text, range filters are plain string
//! comparisons.

use crate::Database;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};
use ski_core::{
    ForecastDataPoint, Granularity, HistoricalDailyWeather, LiftSnapshot, NearbyStation,
    ObservationStore, RunSnapshot, StationObservation, TerrainStore,
};
use ski_utils::dates::{format_date, format_date_time, parse_date, parse_date_time};

impl ObservationStore for Database {
    fn nearest_stations(
        &self,
        resort_name: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<NearbyStation>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT rsm.station_triplet, ss.station_name, rsm.distance_miles
             FROM resort_station_mapping rsm
             INNER JOIN snotel_stations ss ON rsm.station_triplet = ss.station_triplet
             WHERE rsm.resort_name = ?1
             ORDER BY rsm.distance_miles ASC, rsm.station_triplet ASC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![resort_name, limit as i64], |row| {
                Ok(NearbyStation {
                    station_triplet: row.get(0)?,
                    station_name: row.get(1)?,
                    distance_miles: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "[SKI] query: nearest_stations({}) returned {} records",
            resort_name,
            rows.len()
        );
        Ok(rows)
    }

    fn station_observations(
        &self,
        station_ids: &[String],
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> anyhow::Result<Vec<StationObservation>> {
        if station_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (0..station_ids.len())
            .map(|i| format!("?{}", i + 3))
            .collect::<Vec<_>>()
            .join(", ");
        let hour_filter = match granularity {
            Granularity::Daily => "",
            Granularity::Hourly => "AND observation_hour IS NOT NULL",
        };
        let sql = format!(
            "SELECT station_triplet, observation_date, observation_hour,
                    snow_depth_in, snow_water_equivalent_in,
                    temp_min_f, temp_max_f, temp_avg_f, temp_observed_f,
                    precip_accum_in, precip_increment_in,
                    wind_speed_avg_mph, wind_speed_max_mph, wind_direction_avg_deg
             FROM snotel_observations
             WHERE observation_date >= ?1 AND observation_date <= ?2
               AND station_triplet IN ({})
               {}
             ORDER BY observation_date ASC, observation_hour ASC, station_triplet ASC",
            placeholders, hour_filter
        );

        let mut bind: Vec<Value> = vec![
            Value::Text(format_date(&start)),
            Value::Text(format_date(&end)),
        ];
        bind.extend(station_ids.iter().cloned().map(Value::Text));

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let raw = stmt
            .query_map(params_from_iter(bind), read_observation)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(raw.len());
        for (date, mut obs) in raw {
            obs.date = parse_date(&date)?;
            rows.push(obs);
        }
        log::debug!(
            "[SKI] query: station_observations({:?}) returned {} records",
            granularity,
            rows.len()
        );
        Ok(rows)
    }

    fn historical_daily_weather(
        &self,
        resort_name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<HistoricalDailyWeather>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT observation_date, temp_min_f, temp_max_f, temp_avg_f,
                    precip_total_in, snowfall_total_in
             FROM historical_weather_daily
             WHERE resort_name = ?1
               AND observation_date >= ?2 AND observation_date <= ?3
             ORDER BY observation_date ASC",
        )?;
        let raw = stmt
            .query_map(
                params![resort_name, format_date(&start), format_date(&end)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<f64>>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                        row.get::<_, Option<f64>>(3)?,
                        row.get::<_, Option<f64>>(4)?,
                        row.get::<_, Option<f64>>(5)?,
                    ))
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let rows = raw
            .into_iter()
            .map(|(date, temp_min_f, temp_max_f, temp_avg_f, precip_total_in, snowfall_total)| {
                parse_date(&date).map(|date| HistoricalDailyWeather {
                    date,
                    temp_min_f,
                    temp_max_f,
                    temp_avg_f,
                    precip_total_in,
                    snowfall_total_in: snowfall_total,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::debug!(
            "[SKI] query: historical_daily_weather({}) returned {} records",
            resort_name,
            rows.len()
        );
        Ok(rows)
    }

    fn forecasts(
        &self,
        resort_name: &str,
        valid_from: NaiveDateTime,
        valid_to: NaiveDateTime,
    ) -> anyhow::Result<Vec<ForecastDataPoint>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT source, forecast_time, valid_time,
                    temp_high_f, temp_low_f, snow_amount_in, precip_amount_in, precip_prob_pct,
                    wind_speed_mph, wind_direction_deg, wind_gust_mph,
                    conditions_text, icon_code
             FROM weather_forecasts
             WHERE resort_name = ?1
               AND valid_time >= ?2 AND valid_time <= ?3
             ORDER BY source ASC, valid_time ASC",
        )?;
        let raw = stmt
            .query_map(
                params![
                    resort_name,
                    format_date_time(&valid_from),
                    format_date_time(&valid_to)
                ],
                |row| {
                    Ok((
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        ForecastRow {
                            source: row.get(0)?,
                            temp_high_f: row.get(3)?,
                            temp_low_f: row.get(4)?,
                            snow_amount_in: row.get(5)?,
                            precip_amount_in: row.get(6)?,
                            precip_prob_pct: row.get(7)?,
                            wind_speed_mph: row.get(8)?,
                            wind_direction_deg: row.get(9)?,
                            wind_gust_mph: row.get(10)?,
                            conditions_text: row.get(11)?,
                            icon_code: row.get(12)?,
                        },
                    ))
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let rows = raw
            .into_iter()
            .map(|(forecast_time, valid_time, r)| -> anyhow::Result<ForecastDataPoint> {
                Ok(ForecastDataPoint {
                    source: r.source,
                    forecast_time: parse_date_time(&forecast_time)?,
                    valid_time: parse_date_time(&valid_time)?,
                    temp_high_f: r.temp_high_f,
                    temp_low_f: r.temp_low_f,
                    snow_amount_in: r.snow_amount_in,
                    precip_amount_in: r.precip_amount_in,
                    precip_prob_pct: r.precip_prob_pct,
                    wind_speed_mph: r.wind_speed_mph,
                    wind_direction_deg: r.wind_direction_deg,
                    wind_gust_mph: r.wind_gust_mph,
                    conditions_text: r.conditions_text,
                    icon_code: r.icon_code,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::debug!(
            "[SKI] query: forecasts({}) returned {} records",
            resort_name,
            rows.len()
        );
        Ok(rows)
    }

    fn station_resorts(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT resort_name FROM resort_station_mapping
             ORDER BY resort_name ASC",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::debug!("[SKI] query: station_resorts returned {} records", rows.len());
        Ok(rows)
    }

    fn forecast_resorts(&self, valid_from: NaiveDateTime) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT resort_name FROM weather_forecasts
             WHERE valid_time >= ?1
             ORDER BY resort_name ASC",
        )?;
        let rows = stmt
            .query_map(params![format_date_time(&valid_from)], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::debug!("[SKI] query: forecast_resorts returned {} records", rows.len());
        Ok(rows)
    }
}

impl TerrainStore for Database {
    fn lift_snapshots(&self, resort_name: &str) -> anyhow::Result<Vec<LiftSnapshot>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT lift_name, lift_type, is_open, updated_date
             FROM lifts
             WHERE resort_name = ?1
             ORDER BY lift_name ASC, updated_date ASC",
        )?;
        let rows = stmt
            .query_map(params![resort_name], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(lift_name, lift_type, is_open, date)| {
                parse_date(&date).map(|updated_date| LiftSnapshot {
                    resort_name: resort_name.to_string(),
                    lift_name,
                    lift_type,
                    is_open,
                    updated_date,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::debug!(
            "[SKI] query: lift_snapshots({}) returned {} records",
            resort_name,
            rows.len()
        );
        Ok(rows)
    }

    fn run_snapshots(&self, resort_name: &str) -> anyhow::Result<Vec<RunSnapshot>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT run_name, run_difficulty, is_open, run_area, run_groomed, updated_date
             FROM runs
             WHERE resort_name = ?1
             ORDER BY run_name ASC, updated_date ASC",
        )?;
        let rows = stmt
            .query_map(params![resort_name], |row| {
                let date: String = row.get(5)?;
                let run = RunSnapshot {
                    resort_name: resort_name.to_string(),
                    run_name: row.get(0)?,
                    difficulty: row.get(1)?,
                    is_open: row.get(2)?,
                    area: row.get(3)?,
                    groomed: row.get(4)?,
                    updated_date: NaiveDate::default(),
                };
                Ok((date, run))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(date, run)| -> anyhow::Result<RunSnapshot> {
                Ok(RunSnapshot {
                    updated_date: parse_date(&date)?,
                    ..run
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::debug!(
            "[SKI] query: run_snapshots({}) returned {} records",
            resort_name,
            rows.len()
        );
        Ok(rows)
    }

    fn terrain_resorts(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT resort_name FROM lifts
             UNION
             SELECT resort_name FROM runs
             ORDER BY resort_name ASC",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::debug!("[SKI] query: terrain_resorts returned {} records", rows.len());
        Ok(rows)
    }
}

// ───────────────────── Helper Functions ─────────────────────

/// Forecast columns that map straight onto [`ForecastDataPoint`].
struct ForecastRow {
    source: String,
    temp_high_f: Option<f64>,
    temp_low_f: Option<f64>,
    snow_amount_in: Option<f64>,
    precip_amount_in: Option<f64>,
    precip_prob_pct: Option<i32>,
    wind_speed_mph: Option<f64>,
    wind_direction_deg: Option<i32>,
    wind_gust_mph: Option<f64>,
    conditions_text: Option<String>,
    icon_code: Option<String>,
}

/// Reads one `snotel_observations` row. The date comes back as raw text and
/// is parsed by the caller, since rusqlite row closures can't return anyhow
/// errors.
fn read_observation(row: &Row<'_>) -> rusqlite::Result<(String, StationObservation)> {
    let date: String = row.get(1)?;
    let obs = StationObservation {
        station_triplet: row.get(0)?,
        date: NaiveDate::default(),
        hour: row.get(2)?,
        snow_depth_in: row.get(3)?,
        snow_water_equivalent_in: row.get(4)?,
        temp_min_f: row.get(5)?,
        temp_max_f: row.get(6)?,
        temp_avg_f: row.get(7)?,
        temp_observed_f: row.get(8)?,
        precip_accum_in: row.get(9)?,
        precip_increment_in: row.get(10)?,
        wind_speed_avg_mph: row.get(11)?,
        wind_speed_max_mph: row.get(12)?,
        wind_direction_avg_deg: row.get(13)?,
    };
    Ok((date, obs))
}
