//! Runs the weather and lift status operations and prints their results as
//! JSON.

use crate::fixtures::{load_aliases, load_database};
use crate::StoreArgs;
use chrono::Local;
use serde::Serialize;
use ski_db::Database;
use ski_utils::dates::parse_date;
use ski_weather::{ResortAliases, WeatherService, WeatherWindow};

/// Weather summary for one resort; prints `null` when it has no stations.
pub async fn run_weather(resort: &str, args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, window) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    let summary = service.resort_weather(resort, window)?;
    if summary.is_none() {
        log::warn!("[SKI] report: No weather data for '{}'", resort);
    }
    print_json(&summary)
}

pub async fn run_all_weather(args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, window) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    print_json(&service.all_resort_weather(window)?)
}

/// Forecasts for one resort; prints `null` when none are in the window.
pub async fn run_forecast(resort: &str, args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, window) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    let forecast = service.resort_forecast(resort, window)?;
    if forecast.is_none() {
        log::warn!("[SKI] report: No forecasts for '{}'", resort);
    }
    print_json(&forecast)
}

pub async fn run_all_forecasts(args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, window) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    print_json(&service.all_resort_forecasts(window)?)
}

/// Lift and run status for one resort; prints `null` when it has no terrain
/// data. The reporting window does not apply.
pub async fn run_status(resort: &str, args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, _) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    let status = service.resort_status(resort)?;
    if status.is_none() {
        log::warn!("[SKI] report: No lift or run data for '{}'", resort);
    }
    print_json(&status)
}

pub async fn run_all_status(args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, _) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    print_json(&service.all_resort_status()?)
}

pub async fn run_recently_opened(args: &StoreArgs) -> anyhow::Result<()> {
    let (db, aliases, _) = prepare(args).await?;
    let service = WeatherService::new(&db, aliases);
    print_json(&service.recently_opened()?)
}

/// The reporting window described by the shared flags.
pub fn window(args: &StoreArgs) -> anyhow::Result<WeatherWindow> {
    let today = match args.today.as_deref() {
        Some(s) => parse_date(s).map_err(|e| anyhow::anyhow!("Invalid --today '{}': {}", s, e))?,
        None => Local::now().date_naive(),
    };
    Ok(WeatherWindow::new(today, args.days))
}

// ───────────────────── Helper Functions ─────────────────────

async fn prepare(args: &StoreArgs) -> anyhow::Result<(Database, ResortAliases, WeatherWindow)> {
    let window = window(args)?;
    let db = load_database(&args.data_dir).await?;
    let aliases = load_aliases(args.aliases.as_deref()).await?;
    log::info!(
        "[SKI] report: Window {} to {} ({} days)",
        window.history_start(),
        window.history_end(),
        window.days
    );
    Ok((db, aliases, window))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
