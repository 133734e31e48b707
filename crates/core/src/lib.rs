//! # Stroke Core
//!
//! Core scoring logic for the stroke risk service.
//!
//! This crate turns a submitted assessment into a risk estimate:
//! - Input validation and coercion (`input`)
//! - Fixed-order feature encoding (`encoder`)
//! - Frozen standardisation and classification from fitted artifacts (`scaler`, `classifier`,
//!   `artifacts`)
//! - Threshold decision policy (`policy`) and a rule-based risk factor explainer (`explainer`)
//! - The immutable `InferenceContext` that ties them together (`context`)
//!
//! **No API concerns**: HTTP servers, request/response wire types and the advisory chat belong
//! in `api-rest`, `api-shared` and `advisory`.

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod context;
pub mod encoder;
pub mod error;
pub mod explainer;
pub mod input;
pub mod policy;
pub mod scaler;

pub use artifacts::{load_classifier_artifact, ArtifactSet};
pub use classifier::{ClassifierArtifact, ProbabilisticClassifier};
pub use config::{ArtifactPaths, ExplainerThresholds, ScoringConfig};
pub use constants::{FEATURE_COUNT, FEATURE_NAMES};
pub use context::{InferenceContext, RiskAssessment};
pub use encoder::{encode, encode_form, FeatureVector};
pub use error::{ScoringError, ScoringResult};
pub use explainer::{FactorValue, RiskFactor};
pub use input::{AssessmentForm, FormValue, RawAssessmentInput};
pub use policy::{classify, RiskLabel};
pub use scaler::{ScaledFeatureVector, StandardScaler};
