//! Inference context and the scoring pipeline.
//!
//! An `InferenceContext` is built once during process startup and shared read-only by every
//! request handler (typically behind an `Arc`). It owns the scoring configuration and the
//! fitted artifacts, or the reason they could not be loaded. Once constructed it is never
//! mutated, so concurrent assessments need no locking.
//!
//! ## Pipeline
//!
//! ```text
//! RawAssessmentInput ─┬─ encode ─ scale ─ predict_probability ─ classify ─┐
//!                     └─ explain ─────────────────────────────────────────┴─ RiskAssessment
//! ```
//!
//! ## Unavailable artifacts
//!
//! If the artifacts failed to load, the context remembers why and every call that needs them
//! fails with `ScoringError::ArtifactUnavailable`. There is no retry: the artifacts are only
//! read again when the process restarts.

use crate::artifacts::ArtifactSet;
use crate::config::{ArtifactPaths, ScoringConfig};
use crate::encoder::{encode, FeatureVector};
use crate::explainer::{explain, RiskFactor};
use crate::input::{AssessmentForm, RawAssessmentInput};
use crate::policy::{classify_with_threshold, RiskLabel};
use crate::scaler::ScaledFeatureVector;
use crate::{ScoringError, ScoringResult};
use std::sync::Arc;

/// Outcome of a single assessment.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskAssessment {
    pub probability: f64,
    pub label: RiskLabel,
    pub top_factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    /// Probability as a percentage rounded to one decimal place.
    ///
    /// Ties are rounded to even on the exact value of `probability * 100`, so `0.0125` gives
    /// `1.2` rather than `1.3`.
    pub fn probability_percent(&self) -> f64 {
        let percent = self.probability * 100.0;
        format!("{percent:.1}").parse().unwrap_or(percent)
    }
}

#[derive(Clone, Debug)]
pub enum ArtifactState {
    Loaded(Arc<ArtifactSet>),
    Unavailable(String),
}

#[derive(Clone, Debug)]
pub struct InferenceContext {
    config: ScoringConfig,
    artifacts: ArtifactState,
}

impl InferenceContext {
    /// A ready context over already loaded artifacts.
    pub fn new(config: ScoringConfig, artifacts: ArtifactSet) -> Self {
        Self {
            config,
            artifacts: ArtifactState::Loaded(Arc::new(artifacts)),
        }
    }

    /// A context whose artifacts could not be loaded.
    pub fn unavailable(config: ScoringConfig, reason: impl Into<String>) -> Self {
        Self {
            config,
            artifacts: ArtifactState::Unavailable(reason.into()),
        }
    }

    /// Load the artifacts from `paths`.
    ///
    /// Never fails: a load error is logged and recorded so that callers can decide whether
    /// to abort startup (see [`InferenceContext::unavailable_reason`]).
    pub fn load(config: ScoringConfig, paths: &ArtifactPaths) -> Self {
        match ArtifactSet::load(paths) {
            Ok(artifacts) => Self::new(config, artifacts),
            Err(e) => {
                tracing::error!("failed to load model artifacts: {}", e);
                Self::unavailable(config, e.to_string())
            }
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Whether assessments can be scored.
    pub fn is_ready(&self) -> bool {
        matches!(self.artifacts, ArtifactState::Loaded(_))
    }

    /// Why the artifacts are missing, or `None` when the context is ready.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.artifacts {
            ArtifactState::Loaded(_) => None,
            ArtifactState::Unavailable(reason) => Some(reason),
        }
    }

    fn artifacts(&self) -> ScoringResult<&ArtifactSet> {
        match &self.artifacts {
            ArtifactState::Loaded(set) => Ok(set),
            ArtifactState::Unavailable(reason) => {
                Err(ScoringError::ArtifactUnavailable(reason.clone()))
            }
        }
    }

    /// Standardise encoded features with the loaded scaler.
    ///
    /// # Errors
    ///
    /// `ArtifactUnavailable` without artifacts, `ArithmeticDomain` for a non-finite result.
    pub fn scale(&self, features: &FeatureVector) -> ScoringResult<ScaledFeatureVector> {
        self.artifacts()?.scaler().transform(features)
    }

    /// Probability of the positive class, checked to be a finite value in `[0, 1]`.
    pub fn predict_probability(&self, features: &ScaledFeatureVector) -> ScoringResult<f64> {
        let probability = self
            .artifacts()?
            .classifier()
            .predict_probability(features)?;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ScoringError::ArithmeticDomain(format!(
                "classifier returned probability {probability}"
            )));
        }
        Ok(probability)
    }

    pub fn classify(&self, probability: f64) -> RiskLabel {
        classify_with_threshold(probability, self.config.decision_threshold())
    }

    pub fn explain(&self, raw: &RawAssessmentInput) -> Vec<RiskFactor> {
        explain(raw, self.config.explainer(), self.config.max_factors())
    }

    /// Run the full pipeline on a validated input.
    ///
    /// # Errors
    ///
    /// - `ArtifactUnavailable` if the artifacts were not loaded
    /// - `ArithmeticDomain` if scaling or prediction produced a non-finite value
    pub fn assess(&self, raw: &RawAssessmentInput) -> ScoringResult<RiskAssessment> {
        // Fail before any work so a degraded service never does partial scoring.
        self.artifacts()?;

        let features = encode(raw);
        let scaled = self.scale(&features)?;
        let probability = self.predict_probability(&scaled)?;

        Ok(RiskAssessment {
            probability,
            label: self.classify(probability),
            top_factors: self.explain(raw),
        })
    }

    /// Validate a submitted form, then run the pipeline.
    pub fn assess_form(&self, form: &AssessmentForm) -> ScoringResult<RiskAssessment> {
        let raw = RawAssessmentInput::from_form(form)?;
        self.assess(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::test_support::{write_logistic, write_scaler};
    use crate::classifier::{LogisticRegression, ProbabilisticClassifier};
    use crate::config::ExplainerThresholds;
    use crate::constants::FEATURE_COUNT;
    use crate::scaler::StandardScaler;
    use tempfile::TempDir;

    fn form(values: [&str; 10]) -> AssessmentForm {
        let [age, ht, hd, glucose, bmi, gender, married, work, residence, smoking] = values;
        AssessmentForm {
            age: Some(age.into()),
            hypertension: Some(ht.into()),
            heart_disease: Some(hd.into()),
            avg_glucose_level: Some(glucose.into()),
            bmi: Some(bmi.into()),
            gender: Some(gender.into()),
            ever_married: Some(married.into()),
            work_type: Some(work.into()),
            residence_type: Some(residence.into()),
            smoking_status: Some(smoking.into()),
        }
    }

    fn scenario_a() -> AssessmentForm {
        form(["65", "1", "1", "160", "32", "Male", "Yes", "Private", "Urban", "smokes"])
    }

    fn scenario_b() -> AssessmentForm {
        form(["50", "0", "0", "100", "25", "Female", "No", "Govt_job", "Rural", "never smoked"])
    }

    /// Logistic model driven by age only: z = 0.1 * (age - 60) - 3.
    fn age_driven_context() -> InferenceContext {
        let scaler = StandardScaler::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]).unwrap();
        let mut coef = [0.0; FEATURE_COUNT];
        coef[0] = 0.1;
        let model = LogisticRegression::new(coef, -9.0).unwrap();
        let set = ArtifactSet::new(scaler, Box::new(model)).unwrap();
        InferenceContext::new(ScoringConfig::default(), set)
    }

    #[derive(Debug)]
    struct BrokenClassifier(f64);

    impl ProbabilisticClassifier for BrokenClassifier {
        fn kind(&self) -> &'static str {
            "broken"
        }
        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }
        fn predict_probability(&self, _features: &ScaledFeatureVector) -> ScoringResult<f64> {
            Ok(self.0)
        }
    }

    fn broken_context(probability: f64) -> InferenceContext {
        let scaler = StandardScaler::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]).unwrap();
        let set = ArtifactSet::new(scaler, Box::new(BrokenClassifier(probability))).unwrap();
        InferenceContext::new(ScoringConfig::default(), set)
    }

    #[test]
    fn scenario_a_is_high_risk_with_three_factors() {
        let ctx = age_driven_context();
        let assessment = ctx.assess_form(&scenario_a()).expect("assessment");

        // z = 6.5 - 9 = -2.5, p ≈ 0.0759
        assert_eq!(assessment.label, RiskLabel::High);
        assert_eq!(assessment.probability_percent(), 7.6);
        let names: Vec<_> = assessment.top_factors.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Advanced Age", "Hypertension", "Heart Disease"]);
    }

    #[test]
    fn scenario_b_has_single_overweight_factor() {
        let ctx = age_driven_context();
        let assessment = ctx.assess_form(&scenario_b()).expect("assessment");

        // z = 5 - 9 = -4, p ≈ 0.0180 which is below the 0.02 threshold
        assert_eq!(assessment.label, RiskLabel::Low);
        assert_eq!(assessment.probability_percent(), 1.8);
        assert_eq!(assessment.top_factors.len(), 1);
        assert_eq!(assessment.top_factors[0].name, "Overweight");
        assert_eq!(assessment.top_factors[0].impact, 1);
    }

    #[test]
    fn threshold_comes_from_config() {
        let scaler = StandardScaler::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]).unwrap();
        let mut coef = [0.0; FEATURE_COUNT];
        coef[0] = 0.1;
        let model = LogisticRegression::new(coef, -9.0).unwrap();
        let set = ArtifactSet::new(scaler, Box::new(model)).unwrap();
        let config = ScoringConfig::default().with_decision_threshold(0.1).unwrap();
        let ctx = InferenceContext::new(config, set);

        let assessment = ctx.assess_form(&scenario_a()).unwrap();
        assert_eq!(assessment.label, RiskLabel::Low);
    }

    #[test]
    fn explainer_cutoffs_come_from_config() {
        let scaler = StandardScaler::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]).unwrap();
        let model = LogisticRegression::new([0.0; FEATURE_COUNT], -4.0).unwrap();
        let set = ArtifactSet::new(scaler, Box::new(model)).unwrap();
        let config = ScoringConfig::default().with_explainer_thresholds(ExplainerThresholds {
            advanced_age: 45.0,
            ..ExplainerThresholds::default()
        });
        let ctx = InferenceContext::new(config, set);
        assert_eq!(ctx.config().explainer().advanced_age, 45.0);

        // Age 50 is not "advanced" under the default cutoff of 60.
        let assessment = ctx.assess_form(&scenario_b()).unwrap();
        let names: Vec<_> = assessment.top_factors.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Advanced Age", "Overweight"]);
    }

    #[test]
    fn encode_then_scale_is_bit_identical_across_runs() {
        let temp = TempDir::new().unwrap();
        let scaler = write_scaler(temp.path(), 43.2, 22.6);
        let model = write_logistic(temp.path(), [0.05; FEATURE_COUNT], -4.0);
        let paths = ArtifactPaths::new(model, scaler);
        let ctx = InferenceContext::load(ScoringConfig::default(), &paths);
        assert!(ctx.is_ready());

        let raw = RawAssessmentInput::from_form(&scenario_a()).unwrap();
        let first = ctx.scale(&encode(&raw)).unwrap();
        let second = ctx.scale(&encode(&raw)).unwrap();
        for (a, b) in first.values().iter().zip(second.values()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn missing_classifier_fails_every_request() {
        let temp = TempDir::new().unwrap();
        let scaler = write_scaler(temp.path(), 0.0, 1.0);
        let paths = ArtifactPaths::new(temp.path().join("stroke_model.json"), scaler);
        let ctx = InferenceContext::load(ScoringConfig::default(), &paths);

        assert!(!ctx.is_ready());
        assert!(ctx.unavailable_reason().is_some());
        for form in [scenario_a(), scenario_b()] {
            let err = ctx.assess_form(&form).expect_err("no artifacts");
            assert!(matches!(err, ScoringError::ArtifactUnavailable(_)));
        }
        let features = FeatureVector::from([1.0; FEATURE_COUNT]);
        assert!(matches!(
            ctx.scale(&features),
            Err(ScoringError::ArtifactUnavailable(_))
        ));
    }

    #[test]
    fn validation_is_reported_before_artifact_state() {
        let ctx = InferenceContext::unavailable(ScoringConfig::default(), "not loaded");
        let mut bad = scenario_a();
        bad.age = None;
        assert!(matches!(
            ctx.assess_form(&bad),
            Err(ScoringError::Validation { field: "age", .. })
        ));
    }

    #[test]
    fn non_finite_probability_fails_closed() {
        for p in [f64::NAN, 1.5, -0.1] {
            let ctx = broken_context(p);
            let err = ctx.assess_form(&scenario_a()).expect_err("bad probability");
            assert!(matches!(err, ScoringError::ArithmeticDomain(_)));
        }
    }

    #[test]
    fn probability_percent_rounds_to_one_decimal() {
        let assessment = RiskAssessment {
            probability: 0.12341,
            label: RiskLabel::High,
            top_factors: vec![],
        };
        assert_eq!(assessment.probability_percent(), 12.3);

        let assessment = RiskAssessment {
            probability: 0.0196,
            label: RiskLabel::Low,
            top_factors: vec![],
        };
        assert_eq!(assessment.probability_percent(), 2.0);
    }

    #[test]
    fn probability_percent_rounds_ties_to_even() {
        for (probability, expected) in [(0.0125, 1.2), (0.0025, 0.2), (0.0225, 2.2)] {
            let assessment = RiskAssessment {
                probability,
                label: RiskLabel::Low,
                top_factors: vec![],
            };
            assert_eq!(
                assessment.probability_percent(),
                expected,
                "probability {probability}"
            );
        }
    }

    #[test]
    fn context_is_shareable_across_threads() {
        let ctx = Arc::new(age_driven_context());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                std::thread::spawn(move || ctx.assess_form(&scenario_a()).unwrap())
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
