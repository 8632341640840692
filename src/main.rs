//! Pokedex - A command-line PokeAPI explorer
//!
//! Reads commands from stdin and answers them from PokeAPI, caching
//! responses for the configured interval.

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, GOODBYE};
use pokedex::{Cache, Config, PokeClient, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the API client and session
/// 5. Run the REPL until `exit`, end of input or Ctrl+C
/// 6. Stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the way of the prompt;
    // override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, base_url={}, request_timeout={}s, page_size={}",
        config.cache_interval, config.base_url, config.request_timeout, config.page_size
    );

    let shutdown = CancellationToken::new();
    let cache = Cache::with_cancellation(config.cache_interval(), shutdown.clone())
        .context("Failed to create response cache")?;
    let client = PokeClient::new(&config, cache.clone()).context("Failed to build HTTP client")?;
    let mut session = Session::new(client);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => {
            result.context("REPL terminated")?;
        }
        _ = interrupt() => {
            println!();
            println!("{}", GOODBYE);
        }
    }

    shutdown.cancel();
    cache.shutdown().await;
    info!("Pokedex shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C.
async fn interrupt() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down...");
}
