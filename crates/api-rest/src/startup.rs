//! Startup configuration shared by the REST binaries.
//!
//! Everything is read from the environment exactly once, before the server starts; request
//! handlers only ever see the resolved values.

use crate::{router, AppState, DEFAULT_REST_ADDR};
use advisory::{AdvisoryConfig, AdvisoryResponder};
use stroke_core::config::{flag_from_env_value, scoring_config_from_env_value};
use stroke_core::{ArtifactPaths, InferenceContext, ScoringConfig};

/// Resolved startup settings.
#[derive(Clone, Debug)]
pub struct Settings {
    pub rest_addr: String,
    pub artifact_paths: ArtifactPaths,
    pub scoring: ScoringConfig,
    pub allow_degraded_start: bool,
    pub advisory: AdvisoryConfig,
}

impl Settings {
    /// Resolve settings from the process environment.
    ///
    /// # Environment Variables
    /// - `STROKE_REST_ADDR`: server address (default: "0.0.0.0:5000")
    /// - `STROKE_MODEL_PATH` / `STROKE_SCALER_PATH`: artifact locations
    /// - `STROKE_DECISION_THRESHOLD`: decision threshold in (0, 1] (default: 0.02)
    /// - `STROKE_ALLOW_DEGRADED_START`: serve even if the artifacts fail to load
    /// - `GOOGLE_GENAI_API_KEY`, `STROKE_GENAI_MODEL`, `STROKE_GENAI_TIMEOUT_SECS`: generative
    ///   advisory
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`, which returns the raw value of a variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold, the degraded-start flag or the advisory timeout
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let rest_addr = lookup("STROKE_REST_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.into());

        Ok(Self {
            rest_addr,
            artifact_paths: ArtifactPaths::from_env_values(
                lookup("STROKE_MODEL_PATH"),
                lookup("STROKE_SCALER_PATH"),
            ),
            scoring: scoring_config_from_env_value(lookup("STROKE_DECISION_THRESHOLD"))?,
            allow_degraded_start: flag_from_env_value(
                "STROKE_ALLOW_DEGRADED_START",
                lookup("STROKE_ALLOW_DEGRADED_START"),
            )?,
            advisory: AdvisoryConfig::from_env_values(
                lookup("GOOGLE_GENAI_API_KEY"),
                lookup("STROKE_GENAI_MODEL"),
                lookup("STROKE_GENAI_TIMEOUT_SECS"),
            )?,
        })
    }
}

/// Load the artifacts and build the handler state.
///
/// # Errors
///
/// Fails if the artifacts could not be loaded, unless `allow_degraded_start` is set.
pub fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let ctx = InferenceContext::load(settings.scoring.clone(), &settings.artifact_paths);

    if let Some(reason) = ctx.unavailable_reason() {
        if !settings.allow_degraded_start {
            anyhow::bail!(
                "model artifacts unavailable: {reason} \
                 (set STROKE_ALLOW_DEGRADED_START=true to serve anyway)"
            );
        }
        tracing::warn!("starting without model artifacts; assessments will return 503");
    }

    Ok(AppState::new(
        ctx,
        AdvisoryResponder::from_config(&settings.advisory),
    ))
}

/// Bind `addr` and serve the REST API until the server stops.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
