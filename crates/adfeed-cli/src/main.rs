mod feed;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "adfeed")]
#[command(about = "Builds merchant-feed items from published ads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Query Hasura for recently updated ads and print feed items as JSON
    Fetch {
        /// Trailing update window in hours (overrides `ADFEED_WINDOW_HOURS`)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        window_hours: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Normalize a saved ads document without contacting Hasura
    Normalize {
        /// JSON file: an ads array, `{"ads": [...]}`, or a GraphQL response
        #[arg(long)]
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// `RUST_LOG` wins when set; otherwise `default_level` is the filter.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    // stdout carries the feed; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let stdout = std::io::stdout();

    let batch = match cli.command {
        Commands::Fetch {
            window_hours,
            pretty,
        } => {
            let config = adfeed_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "loaded configuration");
            let batch = feed::run_fetch(&config, window_hours).await?;
            feed::write_items(&batch.items, pretty, stdout.lock())?;
            batch
        }
        Commands::Normalize { input, pretty } => {
            init_tracing(&feed::log_level_from_env())?;
            let templates = feed::templates_from_env();
            let batch = feed::run_normalize(&input, &templates)?;
            feed::write_items(&batch.items, pretty, stdout.lock())?;
            batch
        }
    };

    tracing::info!(summary = %batch.summary, "feed written");
    Ok(())
}

#[cfg(test)]
mod tests;
