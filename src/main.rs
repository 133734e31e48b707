use api_rest::startup::{build_state, serve, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the stroke risk service
///
/// Loads the model artifacts once, then serves the REST API (assessments, advisory chat,
/// health and Swagger UI) on `STROKE_REST_ADDR`.
///
/// # Environment Variables
/// - `STROKE_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `STROKE_MODEL_PATH`: classifier artifact (default: "stroke_model.json")
/// - `STROKE_SCALER_PATH`: scaler artifact (default: "scaler.json")
/// - `STROKE_DECISION_THRESHOLD`: high risk threshold (default: 0.02)
/// - `STROKE_ALLOW_DEGRADED_START`: keep serving when the artifacts fail to load
/// - `GOOGLE_GENAI_API_KEY`: enables generative answers in the advisory chat
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stroke=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("advisory=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    tracing::info!("++ Starting stroke risk REST on {}", settings.rest_addr);
    tracing::info!(
        "++ Model: {}, scaler: {}, threshold: {}",
        settings.artifact_paths.model().display(),
        settings.artifact_paths.scaler().display(),
        settings.scoring.decision_threshold()
    );

    let state = build_state(&settings)?;
    serve(&settings.rest_addr, state).await
}
