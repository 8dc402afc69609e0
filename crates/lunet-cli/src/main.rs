use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod sync;

#[derive(Debug, Parser)]
#[command(name = "lunet-cli")]
#[command(about = "Catalog mapping pipeline for the lunet storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the upstream catalog, run the mapping pipeline, write artifacts.
    Sync {
        /// Artifact directory; defaults to the configured output dir.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the mapping pipeline over local JSON files (offline).
    Map {
        /// JSON array of raw product records.
        #[arg(long)]
        products: PathBuf,
        /// JSON array of raw variation records.
        #[arg(long)]
        variants: PathBuf,
        /// Artifact directory.
        #[arg(long, default_value = "./out")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync { output } => {
            // Config load precedes everything: a missing catalog endpoint is
            // fatal for the run and must surface here, not mid-pipeline.
            let config = lunet_core::load_app_config_from_env()?;
            init_tracing(&config.log_level);
            sync::run_sync(&config, output).await
        }
        Commands::Map {
            products,
            variants,
            output,
        } => {
            let log_level =
                std::env::var("LUNET_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
            init_tracing(&log_level);
            sync::run_map(&products, &variants, &output)
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
