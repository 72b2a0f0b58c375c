//! DogTale - a daily dog or cat photo from the command line
//!
//! Shows one image per calendar date, cached locally so repeat views of the
//! same date do not hit the network, together with a daily fact, mood and quote.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dogtale::cache::DateKeyedCache;
use dogtale::cli::{self, Cli};
use dogtale::data::ImageClient;

/// Installs the log subscriber; `RUST_LOG` overrides `--log-level`
fn init_logging(level: &str) {
    let filter = format!("dogtale={}", level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let store = match cli.file_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!(dir = %store.dir().display(), "using image cache directory");

    let cache = DateKeyedCache::with_config(store, cli.cache_config());
    let client = ImageClient::new();

    match cli::run(&cli, &cache, &client).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
