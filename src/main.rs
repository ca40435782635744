use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use mini_library::config::LibraryConfig;

#[derive(Parser)]
#[command(name = "mini-library", version, about = "Personal book catalog")]
struct Cli {
    /// Path to the JSON data file (default: <program dir>/data/books.json).
    data_path: Option<PathBuf>,

    /// Search endpoint of the remote catalog.
    #[arg(long)]
    endpoint: Option<String>,

    /// Remote lookup timeout in seconds (default: 5).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = LibraryConfig::resolve().context("failed to locate program directory")?;
    if let Some(path) = cli.data_path {
        config.data_path = path;
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }

    mini_library::interface::menu::run(config).await
}
