//! Fixture directory loading.
//!
//! A data directory holds one CSV file per table. Files are read with
//! `tokio::fs` and handed to the matching [`Database`] loader; a missing file
//! leaves its table empty.

use ski_db::Database;
use ski_weather::ResortAliases;
use std::io::ErrorKind;
use std::path::Path;

type Loader = fn(&Database, &str) -> anyhow::Result<()>;

/// Fixture files in load order.
const FIXTURE_FILES: &[(&str, Loader)] = &[
    ("stations.csv", Database::load_stations),
    ("resort_stations.csv", Database::load_resort_stations),
    ("observations.csv", Database::load_observations),
    ("historical_weather.csv", Database::load_historical_weather),
    ("forecasts.csv", Database::load_forecasts),
    ("lifts.csv", Database::load_lifts),
    ("runs.csv", Database::load_runs),
];

/// Build an in-memory store from every fixture file found in `data_dir`.
pub async fn load_database(data_dir: &str) -> anyhow::Result<Database> {
    let db = Database::new()?;
    let mut loaded = 0;
    for (file_name, load) in FIXTURE_FILES {
        let path = Path::new(data_dir).join(file_name);
        match read_optional(&path).await? {
            Some(csv_data) => {
                load(&db, &csv_data)
                    .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;
                loaded += 1;
            }
            None => log::warn!("[SKI] fixtures: {} not found, skipping", path.display()),
        }
    }
    log::info!("[SKI] fixtures: Loaded {} of {} files from {}", loaded, FIXTURE_FILES.len(), data_dir);
    Ok(db)
}

/// The built-in alias table, with entries from `path` merged over it.
pub async fn load_aliases(path: Option<&str>) -> anyhow::Result<ResortAliases> {
    let mut aliases = ResortAliases::default();
    if let Some(path) = path {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read alias file {}: {}", path, e))?;
        let extra = ResortAliases::from_json(&json)?;
        log::info!("[SKI] fixtures: {} aliases from {}", extra.len(), path);
        aliases.extend(extra);
    }
    Ok(aliases)
}

// ───────────────────── Helper Functions ─────────────────────

async fn read_optional(path: &Path) -> anyhow::Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ski_core::{ObservationStore, TerrainStore};
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ski-cmd-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_missing_files_are_skipped() {
        let dir = scratch_dir("partial");
        std::fs::write(
            dir.join("stations.csv"),
            "station_triplet,station_name,elevation_ft,latitude,longitude\nA,Station A,11000,39.6,-105.9\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("resort_stations.csv"),
            "resort_name,station_triplet,distance_miles\nVail,A,1.5\n",
        )
        .unwrap();

        let db = load_database(dir.to_str().unwrap()).await.unwrap();
        let nearby = db.nearest_stations("Vail", 3).unwrap();
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].station_name, "Station A");
        assert!(db.station_resorts().unwrap().contains(&"Vail".to_string()));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_bundled_fixtures_load() {
        let db = load_database(concat!(env!("CARGO_MANIFEST_DIR"), "/../fixtures")).await.unwrap();
        let resorts = db.station_resorts().unwrap();
        assert_eq!(resorts, vec!["Arapahoe Basin", "Breckenridge", "Copper", "Loveland", "Vail"]);
        assert_eq!(db.nearest_stations("Copper", 3).unwrap().len(), 3);
        assert_eq!(db.terrain_resorts().unwrap(), vec!["Arapahoe Basin", "Loveland", "Vail"]);
        assert_eq!(db.lift_snapshots("Loveland").unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_directory_gives_empty_store() {
        let dir = scratch_dir("empty");
        let db = load_database(dir.to_str().unwrap()).await.unwrap();
        assert!(db.station_resorts().unwrap().is_empty());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_alias_file_merges_over_defaults() {
        let dir = scratch_dir("aliases");
        let path = dir.join("aliases.json");
        std::fs::write(&path, r#"{"abasin": "Arapahoe Basin", "breck": "Breck Town"}"#).unwrap();

        let aliases = load_aliases(path.to_str()).await.unwrap();
        assert_eq!(aliases.resolve("ABasin"), "Arapahoe Basin");
        assert_eq!(aliases.resolve("breck"), "Breck Town");
        assert_eq!(aliases.resolve("a-basin"), "Arapahoe Basin");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_alias_file_is_an_error() {
        assert!(load_aliases(Some("/nonexistent/ski-aliases.json")).await.is_err());
        assert_eq!(load_aliases(None).await.unwrap(), ResortAliases::default());
    }
}
