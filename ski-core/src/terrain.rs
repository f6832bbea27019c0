//! Lift and run status snapshots.
//!
//! Resorts publish the open/closed state of every lift and run; each scrape
//! is stored as one snapshot row per lift or run and date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One lift's reported state on one date.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LiftSnapshot {
    pub resort_name: String,
    pub lift_name: String,
    pub lift_type: Option<String>,
    pub is_open: bool,
    pub updated_date: NaiveDate,
}

/// One run's reported state on one date.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub resort_name: String,
    pub run_name: String,
    /// Free-form difficulty label as published ("Most Difficult", "Green", ...).
    pub difficulty: Option<String>,
    pub is_open: bool,
    pub area: Option<String>,
    pub groomed: bool,
    pub updated_date: NaiveDate,
}

/// Read access to lift and run snapshots.
pub trait TerrainStore {
    /// Every lift snapshot for a resort, ordered by `(lift_name, updated_date)`.
    fn lift_snapshots(&self, resort_name: &str) -> anyhow::Result<Vec<LiftSnapshot>>;

    /// Every run snapshot for a resort, ordered by `(run_name, updated_date)`.
    fn run_snapshots(&self, resort_name: &str) -> anyhow::Result<Vec<RunSnapshot>>;

    /// Distinct resort names with at least one lift or run snapshot, ascending.
    fn terrain_resorts(&self) -> anyhow::Result<Vec<String>>;
}
