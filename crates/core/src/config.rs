//! Scoring runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the inference
//! context. Nothing in this crate reads process-wide environment variables during request
//! handling; binaries read the environment and hand the raw values to the helpers below.

use crate::constants::{
    ADVANCED_AGE_CUTOFF, DEFAULT_DECISION_THRESHOLD, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH,
    HIGH_BMI_CUTOFF, HIGH_GLUCOSE_CUTOFF, MAX_RISK_FACTORS, OVERWEIGHT_BMI_CUTOFF,
};
use crate::{ScoringError, ScoringResult};
use std::path::{Path, PathBuf};

/// Numeric cutoffs used by the risk factor explainer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplainerThresholds {
    pub advanced_age: f64,
    pub high_bmi: f64,
    pub overweight_bmi: f64,
    pub high_glucose: f64,
}

impl Default for ExplainerThresholds {
    fn default() -> Self {
        Self {
            advanced_age: ADVANCED_AGE_CUTOFF,
            high_bmi: HIGH_BMI_CUTOFF,
            overweight_bmi: OVERWEIGHT_BMI_CUTOFF,
            high_glucose: HIGH_GLUCOSE_CUTOFF,
        }
    }
}

/// Scoring configuration resolved at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    decision_threshold: f64,
    explainer: ExplainerThresholds,
    max_factors: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            decision_threshold: DEFAULT_DECISION_THRESHOLD,
            explainer: ExplainerThresholds::default(),
            max_factors: MAX_RISK_FACTORS,
        }
    }
}

impl ScoringConfig {
    /// Replace the decision threshold.
    ///
    /// The threshold must lie in `(0, 1]`; a threshold of zero would label every assessment
    /// high risk.
    pub fn with_decision_threshold(mut self, threshold: f64) -> ScoringResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ScoringError::InvalidConfig(format!(
                "decision threshold must be in (0, 1], got {threshold}"
            )));
        }
        self.decision_threshold = threshold;
        Ok(self)
    }

    /// Replace the explainer cutoffs. Unlike the decision threshold these are not range
    /// checked.
    pub fn with_explainer_thresholds(mut self, explainer: ExplainerThresholds) -> Self {
        self.explainer = explainer;
        self
    }

    /// Probability at or above which an assessment is labelled high risk.
    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }

    /// Cutoffs for the numeric risk factors.
    pub fn explainer(&self) -> &ExplainerThresholds {
        &self.explainer
    }

    /// Upper bound on the number of risk factors reported per assessment.
    pub fn max_factors(&self) -> usize {
        self.max_factors
    }
}

/// Locations of the fitted scaler and classifier artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    model: PathBuf,
    scaler: PathBuf,
}

impl ArtifactPaths {
    /// Create paths for a classifier artifact at `model` and a scaler artifact at `scaler`.
    ///
    /// # Arguments
    ///
    /// * `model` - Path to the classifier JSON export.
    /// * `scaler` - Path to the scaler JSON export.
    ///
    /// Neither path is checked here; missing files surface when the artifacts are loaded.
    pub fn new(model: impl Into<PathBuf>, scaler: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            scaler: scaler.into(),
        }
    }

    /// Build artifact paths from optional override values, falling back to the defaults.
    ///
    /// Empty or whitespace-only values are treated as absent.
    pub fn from_env_values(model: Option<String>, scaler: Option<String>) -> Self {
        let model = non_blank(model).unwrap_or_else(|| DEFAULT_MODEL_PATH.into());
        let scaler = non_blank(scaler).unwrap_or_else(|| DEFAULT_SCALER_PATH.into());
        Self::new(model, scaler)
    }

    /// Classifier artifact location.
    pub fn model(&self) -> &Path {
        &self.model
    }

    /// Scaler artifact location.
    pub fn scaler(&self) -> &Path {
        &self.scaler
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH)
    }
}

/// Parse the decision threshold from an optional string value.
///
/// If `value` is `None` or empty/whitespace, the default threshold is kept.
pub fn scoring_config_from_env_value(value: Option<String>) -> ScoringResult<ScoringConfig> {
    let config = ScoringConfig::default();
    match non_blank(value) {
        None => Ok(config),
        Some(raw) => {
            let threshold = raw.parse::<f64>().map_err(|_| {
                ScoringError::InvalidConfig(format!("decision threshold '{raw}' is not a number"))
            })?;
            config.with_decision_threshold(threshold)
        }
    }
}

/// Parse a boolean switch such as `STROKE_ALLOW_DEGRADED_START`.
///
/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` (case-insensitive). Absent means `false`.
pub fn flag_from_env_value(name: &str, value: Option<String>) -> ScoringResult<bool> {
    match non_blank(value).map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(ScoringError::InvalidConfig(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
