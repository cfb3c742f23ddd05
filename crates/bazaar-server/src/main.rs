//! # Bazaar Server
//!
//! Realtime presence and chat server for the Bazaar marketplace.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default settings
//! bazaar
//!
//! # Configuration is read from ./bazaar.toml, /etc/bazaar/bazaar.toml,
//! # or ~/.config/bazaar/bazaar.toml
//!
//! # Run with environment variables
//! BAZAAR_PORT=5000 BAZAAR_HOST=0.0.0.0 bazaar
//! ```

use anyhow::Result;
use bazaar_server::{config, handlers, metrics};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazaar=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::load()?;

    tracing::info!("Starting Bazaar server on {}:{}", config.host, config.port);

    metrics::init_metrics();

    handlers::run_server(config).await?;

    Ok(())
}
