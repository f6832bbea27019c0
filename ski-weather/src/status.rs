//! Lift and run status per resort.
//!
//! The store keeps one snapshot per lift or run and date. The current state
//! is the latest snapshot of each; the date a lift or run opened is the
//! earliest date it was ever reported open.

use crate::WeatherService;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ski_core::{LiftSnapshot, RunSnapshot, TerrainStore};
use std::collections::BTreeMap;
use std::fmt;

/// Days of open-count history kept per resort.
pub const HISTORY_DAYS: usize = 7;

/// Recently opened lifts (and runs) listed per resort.
pub const RECENTLY_OPENED_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingStatus {
    Open,
    Closed,
}

impl OperatingStatus {
    pub fn from_open(is_open: bool) -> Self {
        if is_open {
            OperatingStatus::Open
        } else {
            OperatingStatus::Closed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingStatus::Open => "open",
            OperatingStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for OperatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunDifficulty {
    Green,
    Blue,
    Black,
    DoubleBlack,
    TerrainPark,
    Other,
}

impl RunDifficulty {
    /// Bucket a published difficulty label by keyword.
    ///
    /// Checked in order, first match wins; "double" and "most difficult" are
    /// tested before "black" and "difficult".
    pub fn classify(label: Option<&str>) -> Self {
        let label = label.unwrap_or("").trim().to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| label.contains(*w));
        if has(&["green", "easiest", "beginner"]) {
            RunDifficulty::Green
        } else if has(&["blue", "intermediate", "more difficult"]) {
            RunDifficulty::Blue
        } else if has(&["double", "expert", "most difficult"]) {
            RunDifficulty::DoubleBlack
        } else if has(&["black", "advanced", "difficult"]) {
            RunDifficulty::Black
        } else if has(&["park", "terrain"]) {
            RunDifficulty::TerrainPark
        } else {
            RunDifficulty::Other
        }
    }
}

/// Open runs counted per difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunsByDifficulty {
    pub green: u32,
    pub blue: u32,
    pub black: u32,
    pub double_black: u32,
    pub terrain_park: u32,
    pub other: u32,
}

impl RunsByDifficulty {
    fn add(&mut self, difficulty: RunDifficulty) {
        let slot = match difficulty {
            RunDifficulty::Green => &mut self.green,
            RunDifficulty::Blue => &mut self.blue,
            RunDifficulty::Black => &mut self.black,
            RunDifficulty::DoubleBlack => &mut self.double_black,
            RunDifficulty::TerrainPark => &mut self.terrain_park,
            RunDifficulty::Other => &mut self.other,
        };
        *slot += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftStatus {
    pub lift_name: String,
    pub lift_type: Option<String>,
    pub status: OperatingStatus,
    /// First date the lift was reported open; only set while it is open.
    pub date_opened: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatus {
    pub run_name: String,
    pub difficulty: Option<String>,
    pub difficulty_class: RunDifficulty,
    pub status: OperatingStatus,
    pub area: Option<String>,
    pub groomed: bool,
    pub date_opened: Option<NaiveDate>,
}

/// Lifts or runs open on one snapshot date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCount {
    pub date: NaiveDate,
    pub open_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyOpened {
    pub name: String,
    pub date_opened: NaiveDate,
}

/// Current lift and run state of one resort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResortStatus {
    pub resort_name: String,
    pub total_lifts: u32,
    pub open_lifts: u32,
    pub closed_lifts: u32,
    pub total_runs: u32,
    pub open_runs: u32,
    pub closed_runs: u32,
    /// Open runs only.
    pub runs_by_difficulty: RunsByDifficulty,
    /// Latest snapshot date across lifts and runs.
    pub last_updated: Option<NaiveDate>,
    pub lifts: Vec<LiftStatus>,
    pub runs: Vec<RunStatus>,
    /// Oldest first, at most [`HISTORY_DAYS`] entries.
    pub lifts_history: Vec<OpenCount>,
    pub runs_history: Vec<OpenCount>,
    /// Newest first, at most [`RECENTLY_OPENED_LIMIT`] entries.
    pub recently_opened_lifts: Vec<RecentlyOpened>,
    pub recently_opened_runs: Vec<RecentlyOpened>,
}

impl ResortStatus {
    /// Build a resort's status from its full snapshot history, or `None`
    /// when there are no lifts or runs at all.
    pub fn from_snapshots(resort_name: &str, lifts: &[LiftSnapshot], runs: &[RunSnapshot]) -> Option<Self> {
        if lifts.is_empty() && runs.is_empty() {
            return None;
        }

        let lift_opened = first_opened(lifts);
        let lifts_now: Vec<LiftStatus> = current(lifts)
            .into_iter()
            .map(|l| LiftStatus {
                lift_name: l.lift_name.clone(),
                lift_type: l.lift_type.clone(),
                status: OperatingStatus::from_open(l.is_open),
                date_opened: opened_if_open(&lift_opened, l),
            })
            .collect();

        let run_opened = first_opened(runs);
        let runs_now: Vec<RunStatus> = current(runs)
            .into_iter()
            .map(|r| RunStatus {
                run_name: r.run_name.clone(),
                difficulty: r.difficulty.clone(),
                difficulty_class: RunDifficulty::classify(r.difficulty.as_deref()),
                status: OperatingStatus::from_open(r.is_open),
                area: r.area.clone(),
                groomed: r.groomed,
                date_opened: opened_if_open(&run_opened, r),
            })
            .collect();

        let mut runs_by_difficulty = RunsByDifficulty::default();
        for run in runs_now.iter().filter(|r| r.status == OperatingStatus::Open) {
            runs_by_difficulty.add(run.difficulty_class);
        }

        let open_lifts = count_open(lifts_now.iter().map(|l| l.status));
        let open_runs = count_open(runs_now.iter().map(|r| r.status));
        let last_updated = lifts
            .iter()
            .map(|l| l.updated_date)
            .chain(runs.iter().map(|r| r.updated_date))
            .max();

        Some(ResortStatus {
            resort_name: resort_name.to_string(),
            total_lifts: lifts_now.len() as u32,
            open_lifts,
            closed_lifts: lifts_now.len() as u32 - open_lifts,
            total_runs: runs_now.len() as u32,
            open_runs,
            closed_runs: runs_now.len() as u32 - open_runs,
            runs_by_difficulty,
            last_updated,
            lifts: lifts_now,
            runs: runs_now,
            lifts_history: open_history(lifts),
            runs_history: open_history(runs),
            recently_opened_lifts: recently_opened(&lift_opened),
            recently_opened_runs: recently_opened(&run_opened),
        })
    }
}

/// A lift or run opening anywhere in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedAtResort {
    pub resort_name: String,
    pub name: String,
    pub date_opened: NaiveDate,
    /// Set for lifts from their latest snapshot.
    pub lift_type: Option<String>,
}

/// Every opening across all resorts, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalRecentlyOpened {
    pub lifts: Vec<OpenedAtResort>,
    pub runs: Vec<OpenedAtResort>,
}

impl<S: TerrainStore> WeatherService<'_, S> {
    /// Lift and run status for one resort, or `None` when the store has no
    /// lifts or runs for it.
    pub fn resort_status(&self, resort_name: &str) -> anyhow::Result<Option<ResortStatus>> {
        self.status_for_canonical(&self.aliases.resolve(resort_name))
    }

    /// Status of every resort with lift or run snapshots, in name order.
    pub fn all_resort_status(&self) -> anyhow::Result<Vec<ResortStatus>> {
        let resorts = self.store.terrain_resorts()?;
        let mut all = Vec::with_capacity(resorts.len());
        for resort in &resorts {
            if let Some(status) = self.status_for_canonical(resort)? {
                all.push(status);
            }
        }
        Ok(all)
    }

    /// Lift and run openings across every resort, newest first.
    pub fn recently_opened(&self) -> anyhow::Result<GlobalRecentlyOpened> {
        let mut global = GlobalRecentlyOpened::default();
        for resort in self.store.terrain_resorts()? {
            let lifts = self.store.lift_snapshots(&resort)?;
            let latest_type: BTreeMap<&str, Option<String>> = current(&lifts)
                .into_iter()
                .map(|l| (l.lift_name.as_str(), l.lift_type.clone()))
                .collect();
            for (name, date_opened) in first_opened(&lifts) {
                global.lifts.push(OpenedAtResort {
                    resort_name: resort.clone(),
                    name: name.to_string(),
                    date_opened,
                    lift_type: latest_type.get(name).cloned().flatten(),
                });
            }

            let runs = self.store.run_snapshots(&resort)?;
            for (name, date_opened) in first_opened(&runs) {
                global.runs.push(OpenedAtResort {
                    resort_name: resort.clone(),
                    name: name.to_string(),
                    date_opened,
                    lift_type: None,
                });
            }
        }

        for list in [&mut global.lifts, &mut global.runs] {
            list.sort_by(|a, b| {
                b.date_opened
                    .cmp(&a.date_opened)
                    .then_with(|| a.resort_name.cmp(&b.resort_name))
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
        log::info!(
            "[SKI] status: {} lift and {} run openings",
            global.lifts.len(),
            global.runs.len()
        );
        Ok(global)
    }

    fn status_for_canonical(&self, resort: &str) -> anyhow::Result<Option<ResortStatus>> {
        let lifts = self.store.lift_snapshots(resort)?;
        let runs = self.store.run_snapshots(resort)?;
        let status = ResortStatus::from_snapshots(resort, &lifts, &runs);
        match &status {
            Some(s) => log::info!(
                "[SKI] status: '{}' {}/{} lifts, {}/{} runs open",
                resort,
                s.open_lifts,
                s.total_lifts,
                s.open_runs,
                s.total_runs
            ),
            None => log::info!("[SKI] status: no lifts or runs for '{}'", resort),
        }
        Ok(status)
    }
}

// ───────────────────── Helper Functions ─────────────────────

/// The parts of a lift or run snapshot the status rollup needs.
trait Snapshot {
    fn name(&self) -> &str;
    fn is_open(&self) -> bool;
    fn updated_date(&self) -> NaiveDate;
}

impl Snapshot for LiftSnapshot {
    fn name(&self) -> &str {
        &self.lift_name
    }
    fn is_open(&self) -> bool {
        self.is_open
    }
    fn updated_date(&self) -> NaiveDate {
        self.updated_date
    }
}

impl Snapshot for RunSnapshot {
    fn name(&self) -> &str {
        &self.run_name
    }
    fn is_open(&self) -> bool {
        self.is_open
    }
    fn updated_date(&self) -> NaiveDate {
        self.updated_date
    }
}

/// Latest snapshot per name, in name order.
fn current<T: Snapshot>(snapshots: &[T]) -> Vec<&T> {
    let mut latest: BTreeMap<&str, &T> = BTreeMap::new();
    for snap in snapshots {
        latest
            .entry(snap.name())
            .and_modify(|prev| {
                if snap.updated_date() >= prev.updated_date() {
                    *prev = snap;
                }
            })
            .or_insert(snap);
    }
    latest.into_values().collect()
}

/// Earliest open date per name; names never reported open are absent.
fn first_opened<T: Snapshot>(snapshots: &[T]) -> BTreeMap<&str, NaiveDate> {
    let mut opened: BTreeMap<&str, NaiveDate> = BTreeMap::new();
    for snap in snapshots.iter().filter(|s| s.is_open()) {
        opened
            .entry(snap.name())
            .and_modify(|d| *d = (*d).min(snap.updated_date()))
            .or_insert(snap.updated_date());
    }
    opened
}

fn opened_if_open<T: Snapshot>(opened: &BTreeMap<&str, NaiveDate>, snap: &T) -> Option<NaiveDate> {
    if snap.is_open() {
        opened.get(snap.name()).copied()
    } else {
        None
    }
}

/// Open count per snapshot date for the last [`HISTORY_DAYS`] dates.
fn open_history<T: Snapshot>(snapshots: &[T]) -> Vec<OpenCount> {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for snap in snapshots {
        *by_date.entry(snap.updated_date()).or_default() += u32::from(snap.is_open());
    }
    let skip = by_date.len().saturating_sub(HISTORY_DAYS);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, open_count)| OpenCount { date, open_count })
        .collect()
}

/// Newest openings first, ties by name.
fn recently_opened(opened: &BTreeMap<&str, NaiveDate>) -> Vec<RecentlyOpened> {
    let mut list: Vec<RecentlyOpened> = opened
        .iter()
        .map(|(name, date)| RecentlyOpened {
            name: name.to_string(),
            date_opened: *date,
        })
        .collect();
    list.sort_by(|a, b| b.date_opened.cmp(&a.date_opened).then_with(|| a.name.cmp(&b.name)));
    list.truncate(RECENTLY_OPENED_LIMIT);
    list
}

fn count_open(statuses: impl Iterator<Item = OperatingStatus>) -> u32 {
    statuses.filter(|s| *s == OperatingStatus::Open).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn lift(name: &str, day: u32, is_open: bool) -> LiftSnapshot {
        LiftSnapshot {
            resort_name: "Loveland".to_string(),
            lift_name: name.to_string(),
            lift_type: Some("Triple".to_string()),
            is_open,
            updated_date: date(day),
        }
    }

    fn run(name: &str, difficulty: Option<&str>, day: u32, is_open: bool) -> RunSnapshot {
        RunSnapshot {
            resort_name: "Loveland".to_string(),
            run_name: name.to_string(),
            difficulty: difficulty.map(str::to_string),
            is_open,
            area: None,
            groomed: false,
            updated_date: date(day),
        }
    }

    #[test]
    fn test_difficulty_keywords() {
        assert_eq!(RunDifficulty::classify(Some("Easiest")), RunDifficulty::Green);
        assert_eq!(RunDifficulty::classify(Some("  Beginner ")), RunDifficulty::Green);
        assert_eq!(RunDifficulty::classify(Some("More Difficult")), RunDifficulty::Blue);
        assert_eq!(RunDifficulty::classify(Some("Most Difficult")), RunDifficulty::DoubleBlack);
        assert_eq!(RunDifficulty::classify(Some("Double Black Diamond")), RunDifficulty::DoubleBlack);
        assert_eq!(RunDifficulty::classify(Some("Black Diamond")), RunDifficulty::Black);
        assert_eq!(RunDifficulty::classify(Some("Advanced")), RunDifficulty::Black);
        assert_eq!(RunDifficulty::classify(Some("Terrain Park")), RunDifficulty::TerrainPark);
        assert_eq!(RunDifficulty::classify(Some("Glades")), RunDifficulty::Other);
        assert_eq!(RunDifficulty::classify(None), RunDifficulty::Other);
    }

    #[test]
    fn test_no_snapshots_is_none() {
        assert!(ResortStatus::from_snapshots("Loveland", &[], &[]).is_none());
    }

    #[test]
    fn test_current_state_uses_latest_snapshot() {
        let lifts = vec![
            lift("Chair 1", 14, false),
            lift("Chair 1", 15, true),
            lift("Chair 1", 16, true),
            lift("Chair 2", 15, true),
            lift("Chair 2", 16, false),
        ];
        let status = ResortStatus::from_snapshots("Loveland", &lifts, &[]).unwrap();

        assert_eq!(status.total_lifts, 2);
        assert_eq!(status.open_lifts, 1);
        assert_eq!(status.closed_lifts, 1);
        assert_eq!(status.total_runs, 0);
        assert_eq!(status.last_updated, Some(date(16)));

        assert_eq!(status.lifts[0].lift_name, "Chair 1");
        assert_eq!(status.lifts[0].status, OperatingStatus::Open);
        assert_eq!(status.lifts[0].date_opened, Some(date(15)));
        // Closed now, so no opening date even though it opened before
        assert_eq!(status.lifts[1].status, OperatingStatus::Closed);
        assert_eq!(status.lifts[1].date_opened, None);
    }

    #[test]
    fn test_open_runs_bucketed_by_difficulty() {
        let runs = vec![
            run("Bear", Some("Most Difficult"), 16, true),
            run("Cat", Some("Easiest"), 16, true),
            run("Dog", Some("Black"), 16, true),
            run("Elk", Some("More Difficult"), 16, false),
            run("Fox", Some("Park"), 16, true),
            run("Gnu", None, 16, true),
        ];
        let status = ResortStatus::from_snapshots("Loveland", &[], &runs).unwrap();

        assert_eq!(status.open_runs, 5);
        assert_eq!(status.closed_runs, 1);
        assert_eq!(
            status.runs_by_difficulty,
            RunsByDifficulty {
                green: 1,
                blue: 0,
                black: 1,
                double_black: 1,
                terrain_park: 1,
                other: 1,
            }
        );
        assert_eq!(status.runs[3].difficulty_class, RunDifficulty::Blue);
    }

    #[test]
    fn test_history_keeps_last_seven_dates_oldest_first() {
        let lifts: Vec<LiftSnapshot> = (1..=9)
            .flat_map(|day| [lift("Chair 1", day, true), lift("Chair 2", day, day % 2 == 0)])
            .collect();
        let status = ResortStatus::from_snapshots("Loveland", &lifts, &[]).unwrap();

        let history: Vec<(NaiveDate, u32)> = status
            .lifts_history
            .iter()
            .map(|h| (h.date, h.open_count))
            .collect();
        assert_eq!(history.len(), HISTORY_DAYS);
        assert_eq!(history[0], (date(3), 1));
        assert_eq!(history[1], (date(4), 2));
        assert_eq!(history[6], (date(9), 1));
        assert!(status.runs_history.is_empty());
    }

    #[test]
    fn test_recently_opened_top_three_newest_first() {
        let lifts = vec![
            lift("Alpha", 10, true),
            lift("Bravo", 12, true),
            lift("Bravo", 11, true),
            lift("Charlie", 13, true),
            lift("Delta", 14, true),
            lift("Echo", 15, false),
        ];
        let status = ResortStatus::from_snapshots("Loveland", &lifts, &[]).unwrap();

        let recent: Vec<(&str, NaiveDate)> = status
            .recently_opened_lifts
            .iter()
            .map(|r| (r.name.as_str(), r.date_opened))
            .collect();
        assert_eq!(
            recent,
            vec![("Delta", date(14)), ("Charlie", date(13)), ("Bravo", date(11))]
        );
    }

    #[test]
    fn test_status_labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&OperatingStatus::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::to_string(&RunDifficulty::DoubleBlack).unwrap(),
            "\"double_black\""
        );
        assert_eq!(OperatingStatus::Closed.to_string(), "closed");
    }
}
