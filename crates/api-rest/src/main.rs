//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when only the REST server is wanted. The workspace's main
//! `stroke-run` binary serves the same router and is what deployments run.

use api_rest::startup::{build_state, serve, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the stroke risk REST API server
///
/// See [`Settings::from_env`] for the environment variables read at startup.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configuration value cannot be parsed,
/// - the model artifacts cannot be loaded and degraded start is not allowed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("stroke_core=info".parse()?)
                .add_directive("advisory=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    tracing::info!("-- Starting stroke risk REST API on {}", settings.rest_addr);

    let state = build_state(&settings)?;
    serve(&settings.rest_addr, state).await
}
