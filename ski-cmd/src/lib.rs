//! Command implementations for the ski resort weather CLI.
//!
//! Every subcommand loads the fixture directory into an in-memory store,
//! runs one weather or lift status operation and prints the result as JSON.

use clap::{Args, Subcommand};

pub mod fixtures;
pub mod report;

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Directory holding the station, observation, forecast and terrain CSV files
    #[arg(short = 'd', long, default_value = "fixtures")]
    pub data_dir: String,

    /// Number of days of history (and forecast) to cover
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Date the window ends on, as YYYY-MM-DD (defaults to the local date)
    #[arg(long)]
    pub today: Option<String>,

    /// JSON file of extra resort aliases, merged over the built-in table
    #[arg(short = 'a', long)]
    pub aliases: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Weighted weather summary and snow trend for one resort
    Weather {
        /// Resort name or nickname (e.g. "a-basin")
        resort: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Weather summaries for every resort with linked stations
    AllWeather {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Provider forecasts for one resort
    Forecast {
        /// Resort name or nickname
        resort: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Provider forecasts for every resort with an upcoming forecast
    AllForecasts {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Lift and run status for one resort
    Status {
        /// Resort name or nickname
        resort: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Lift and run status for every resort with terrain data
    AllStatus {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Lifts and runs that opened most recently, across all resorts
    RecentlyOpened {
        #[command(flatten)]
        store: StoreArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Weather { resort, store } => report::run_weather(&resort, &store).await,
        Command::AllWeather { store } => report::run_all_weather(&store).await,
        Command::Forecast { resort, store } => report::run_forecast(&resort, &store).await,
        Command::AllForecasts { store } => report::run_all_forecasts(&store).await,
        Command::Status { resort, store } => report::run_status(&resort, &store).await,
        Command::AllStatus { store } => report::run_all_status(&store).await,
        Command::RecentlyOpened { store } => report::run_recently_opened(&store).await,
    }
}
