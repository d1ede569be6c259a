mod render;
mod search;
mod theme;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::SearchArgs;
use crate::theme::ThemeAction;

#[derive(Debug, Parser)]
#[command(name = "leadminer")]
#[command(about = "Find business leads with Gemini and export them to Excel")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a three-batch lead search and print the results
    Search(SearchArgs),
    /// Show or change the saved color theme
    Theme {
        /// New theme; omit to print the current one
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = leadminer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run_search(&config, args).await,
        Commands::Theme { action } => theme::run_theme(&config.preferences_path, action),
    }
}
