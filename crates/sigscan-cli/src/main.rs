mod inspect;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sigscan")]
#[command(about = "Startup signal scanner for tech news feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch feeds, extract startup signals, and upsert them
    Run {
        /// Print assembled records as JSON lines instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Feed URL to scan instead of the configured list (repeatable)
        #[arg(long = "feed")]
        feeds: Vec<String>,
    },
    /// Run the extractor on a single headline and print the record
    Extract {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        summary: String,

        #[arg(long, default_value = "")]
        link: String,
    },
    /// Validate a heuristics YAML file and print its table sizes
    Heuristics {
        /// Defaults to `SIGSCAN_HEURISTICS_PATH`, then the built-in tables
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { dry_run, feeds } => run::run_scan(dry_run, feeds).await,
        Commands::Extract {
            title,
            summary,
            link,
        } => inspect::run_extract(&title, &summary, &link),
        Commands::Heuristics { path } => inspect::run_heuristics(path.as_deref()),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so JSON output on stdout stays machine-readable.
pub(crate) fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
