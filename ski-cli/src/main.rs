//! Ski CLI - weighted SNOTEL weather summaries and forecasts for ski resorts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ski-cli",
    version,
    about = "Ski resort weather from nearby SNOTEL stations"
)]
struct Cli {
    #[command(subcommand)]
    command: ski_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[SKI] cli: starting");
    ski_cmd::run(cli.command).await
}
