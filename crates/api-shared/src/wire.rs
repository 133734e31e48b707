//! JSON wire types.
//!
//! Inbound assessment fields are deliberately loose (string, number or boolean) because form
//! clients post everything as strings while JSON clients send primitives. Validation happens
//! in `stroke-core`, never here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stroke_core::{AssessmentForm, FactorValue, FormValue, RiskAssessment, RiskFactor};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AssessmentReq {
    /// Age in years.
    #[schema(value_type = Option<String>, example = "65")]
    pub age: Option<FormValue>,
    /// `0` or `1`.
    #[schema(value_type = Option<String>, example = "1")]
    pub hypertension: Option<FormValue>,
    /// `0` or `1`.
    #[schema(value_type = Option<String>, example = "0")]
    pub heart_disease: Option<FormValue>,
    /// Average glucose level in mg/dL.
    #[schema(value_type = Option<String>, example = "160")]
    pub avg_glucose_level: Option<FormValue>,
    #[schema(value_type = Option<String>, example = "32")]
    pub bmi: Option<FormValue>,
    /// `Male`, `Female` or `Other`.
    #[schema(value_type = Option<String>, example = "Male")]
    pub gender: Option<FormValue>,
    /// `Yes` or `No`.
    #[schema(value_type = Option<String>, example = "Yes")]
    pub ever_married: Option<FormValue>,
    /// `Private`, `Self-employed`, `children`, `Never_worked` or `Govt_job`.
    #[schema(value_type = Option<String>, example = "Private")]
    pub work_type: Option<FormValue>,
    /// `Urban` or `Rural`.
    #[schema(value_type = Option<String>, example = "Urban")]
    pub residence_type: Option<FormValue>,
    /// `formerly smoked`, `never smoked`, `smokes` or `Unknown`.
    #[schema(value_type = Option<String>, example = "smokes")]
    pub smoking_status: Option<FormValue>,
}

impl From<AssessmentReq> for AssessmentForm {
    fn from(req: AssessmentReq) -> Self {
        AssessmentForm {
            age: req.age,
            hypertension: req.hypertension,
            heart_disease: req.heart_disease,
            avg_glucose_level: req.avg_glucose_level,
            bmi: req.bmi,
            gender: req.gender,
            ever_married: req.ever_married,
            work_type: req.work_type,
            residence_type: req.residence_type,
            smoking_status: req.smoking_status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskFactorRes {
    pub name: String,
    /// A number (age, BMI, glucose) or a string such as `"Yes"`.
    #[schema(value_type = Object)]
    pub value: Value,
    /// 1 (mild) to 3 (severe).
    pub impact: u8,
}

impl From<&RiskFactor> for RiskFactorRes {
    fn from(factor: &RiskFactor) -> Self {
        let value = match factor.value {
            FactorValue::Whole(v) => Value::from(v),
            FactorValue::Measurement(v) => Value::from(v),
            FactorValue::Text(v) => Value::from(v),
        };
        Self {
            name: factor.name.to_string(),
            value,
            impact: factor.impact,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentRes {
    #[schema(example = "High Risk of Stroke")]
    pub prediction: String,
    /// Percentage, one decimal place.
    #[schema(example = 7.6)]
    pub probability: f64,
    pub risk_factors: Vec<RiskFactorRes>,
}

impl From<&RiskAssessment> for AssessmentRes {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            prediction: assessment.label.as_str().to_string(),
            probability: assessment.probability_percent(),
            risk_factors: assessment.top_factors.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ChatReq {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatRes {
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    /// Wrap a message in the `{"error": ...}` body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    pub artifacts_loaded: bool,
}
