//! Frozen feature standardisation.

use crate::constants::FEATURE_COUNT;
use crate::encoder::FeatureVector;
use crate::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};

/// Encoded features after standardisation, in the same order as the encoder output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaledFeatureVector([f64; FEATURE_COUNT]);

impl ScaledFeatureVector {
    /// Standardised values, indexed like `FEATURE_NAMES`.
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl From<[f64; FEATURE_COUNT]> for ScaledFeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Serialised form of a fitted standard scaler.
///
/// Mirrors the fitted attributes of a standard scaler: per-feature `mean` and `scale`
/// (standard deviation), plus the optional feature names it was fitted on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Fitted per-feature affine transform `x' = (x - mean) / scale`.
///
/// Parameters are fixed at construction; `transform` takes `&self` and never mutates them.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Build a scaler from fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::ArtifactInvalid` if any mean is non-finite or any scale is
    /// zero or non-finite.
    pub fn new(
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    ) -> ScoringResult<Self> {
        for (i, (m, s)) in mean.iter().zip(scale.iter()).enumerate() {
            if !m.is_finite() {
                return Err(ScoringError::ArtifactInvalid(format!(
                    "scaler mean for feature {i} is not finite"
                )));
            }
            if !s.is_finite() || *s == 0.0 {
                return Err(ScoringError::ArtifactInvalid(format!(
                    "scaler scale for feature {i} must be finite and non-zero, got {s}"
                )));
            }
        }
        Ok(Self { mean, scale })
    }

    /// Build a scaler from its JSON export.
    ///
    /// # Arguments
    ///
    /// * `artifact` - Parsed scaler export; `feature_names`, when present, is checked by the
    ///   caller and ignored here.
    ///
    /// # Returns
    ///
    /// A validated scaler over exactly `FEATURE_COUNT` features.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::ArtifactInvalid` if `mean` or `scale` has the wrong length, or
    /// for any of the reasons given on [`StandardScaler::new`].
    pub fn from_artifact(artifact: ScalerArtifact) -> ScoringResult<Self> {
        let mean = fixed_length("scaler mean", artifact.mean)?;
        let scale = fixed_length("scaler scale", artifact.scale)?;
        Self::new(mean, scale)
    }

    /// Fitted per-feature means.
    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    /// Fitted per-feature standard deviations.
    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }

    /// Apply the fitted transform.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::ArithmeticDomain` if a transformed value is not finite.
    pub fn transform(&self, features: &FeatureVector) -> ScoringResult<ScaledFeatureVector> {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, x) in features.values().iter().enumerate() {
            let scaled = (x - self.mean[i]) / self.scale[i];
            if !scaled.is_finite() {
                return Err(ScoringError::ArithmeticDomain(format!(
                    "scaled feature {i} is not finite"
                )));
            }
            out[i] = scaled;
        }
        Ok(ScaledFeatureVector(out))
    }
}

pub(crate) fn fixed_length(what: &str, values: Vec<f64>) -> ScoringResult<[f64; FEATURE_COUNT]> {
    let len = values.len();
    values.try_into().map_err(|_| {
        ScoringError::ArtifactInvalid(format!(
            "{what} has {len} entries, expected {FEATURE_COUNT}"
        ))
    })
}
