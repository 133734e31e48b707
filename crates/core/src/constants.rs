//! Constants used throughout the stroke core crate.
//!
//! The feature layout below is shared with the offline process that fitted the scaler and
//! classifier artifacts. Artifacts that record feature names are checked against it at load
//! time.

/// Number of model features produced by the encoder.
pub const FEATURE_COUNT: usize = 16;

/// Model feature names, in encoder output order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "hypertension",
    "heart_disease",
    "avg_glucose_level",
    "bmi",
    "gender_Male",
    "gender_Other",
    "ever_married_Yes",
    "work_type_Private",
    "work_type_Self-employed",
    "work_type_children",
    "work_type_Never_worked",
    "Residence_type_Urban",
    "smoking_status_formerly smoked",
    "smoking_status_never smoked",
    "smoking_status_smokes",
];

/// Probability at or above which an assessment is labelled high risk.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.02;

/// Age strictly above which "Advanced Age" is reported.
pub const ADVANCED_AGE_CUTOFF: f64 = 60.0;

/// BMI at or above which "High BMI" is reported.
pub const HIGH_BMI_CUTOFF: f64 = 30.0;

/// BMI at or above which "Overweight" is reported (when below the high cutoff).
pub const OVERWEIGHT_BMI_CUTOFF: f64 = 25.0;

/// Average glucose level strictly above which "High Glucose" is reported.
pub const HIGH_GLUCOSE_CUTOFF: f64 = 140.0;

/// Maximum number of risk factors returned with an assessment.
pub const MAX_RISK_FACTORS: usize = 3;

/// Default path of the classifier artifact.
pub const DEFAULT_MODEL_PATH: &str = "stroke_model.json";

/// Default path of the scaler artifact.
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

/// Label text for a high-risk assessment.
pub const HIGH_RISK_LABEL: &str = "High Risk of Stroke";

/// Label text for a low-risk assessment.
pub const LOW_RISK_LABEL: &str = "Low Risk of Stroke";
