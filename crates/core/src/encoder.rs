//! Feature encoding.
//!
//! Maps a validated `RawAssessmentInput` onto the fixed 16-element feature layout the fitted
//! artifacts were trained against (see [`FEATURE_NAMES`]). Categorical fields are one-hot
//! encoded with one baseline category per field that contributes all-zero indicators:
//!
//! | field          | indicators                                        | baseline  |
//! |----------------|---------------------------------------------------|-----------|
//! | gender         | male, other                                       | female    |
//! | ever_married   | yes                                               | no        |
//! | work_type      | private, self-employed, children, never worked    | govt job  |
//! | residence_type | urban                                             | rural     |
//! | smoking_status | formerly smoked, never smoked, smokes             | unknown   |

use crate::constants::{FEATURE_COUNT, FEATURE_NAMES};
use crate::input::{
    AssessmentForm, EverMarried, Gender, RawAssessmentInput, ResidenceType, SmokingStatus,
    WorkType,
};
use crate::ScoringResult;

/// Encoded model features in contract order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Raw values, indexed like `FEATURE_NAMES`.
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pair each value with its feature name.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

fn indicator(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

/// Encode a validated input into the model feature layout.
pub fn encode(raw: &RawAssessmentInput) -> FeatureVector {
    FeatureVector([
        raw.age.get(),
        indicator(raw.hypertension),
        indicator(raw.heart_disease),
        raw.avg_glucose_level.get(),
        raw.bmi.get(),
        indicator(raw.gender == Gender::Male),
        indicator(raw.gender == Gender::Other),
        indicator(raw.ever_married == EverMarried::Yes),
        indicator(raw.work_type == WorkType::Private),
        indicator(raw.work_type == WorkType::SelfEmployed),
        indicator(raw.work_type == WorkType::Children),
        indicator(raw.work_type == WorkType::NeverWorked),
        indicator(raw.residence_type == ResidenceType::Urban),
        indicator(raw.smoking_status == SmokingStatus::FormerlySmoked),
        indicator(raw.smoking_status == SmokingStatus::NeverSmoked),
        indicator(raw.smoking_status == SmokingStatus::Smokes),
    ])
}

/// Validate a submitted form and encode it.
pub fn encode_form(form: &AssessmentForm) -> ScoringResult<FeatureVector> {
    RawAssessmentInput::from_form(form).map(|raw| encode(&raw))
}
