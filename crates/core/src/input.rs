//! Assessment input validation.
//!
//! Inbound assessment records arrive as loosely typed form values (strings, numbers or
//! booleans, depending on the client). This module coerces them into a `RawAssessmentInput`
//! whose fields are fully typed, so that encoding and explanation never have to deal with
//! malformed data. Missing or unrecognised values are rejected; nothing is silently defaulted
//! to a baseline category.

use crate::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};
use stroke_types::PositiveReal;

/// A single loosely typed form value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Assessment record as submitted by a client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentForm {
    pub age: Option<FormValue>,
    pub hypertension: Option<FormValue>,
    pub heart_disease: Option<FormValue>,
    pub avg_glucose_level: Option<FormValue>,
    pub bmi: Option<FormValue>,
    pub gender: Option<FormValue>,
    pub ever_married: Option<FormValue>,
    pub work_type: Option<FormValue>,
    pub residence_type: Option<FormValue>,
    pub smoking_status: Option<FormValue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EverMarried {
    Yes,
    No,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkType {
    Private,
    SelfEmployed,
    Children,
    NeverWorked,
    GovtJob,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResidenceType {
    Urban,
    Rural,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmokingStatus {
    FormerlySmoked,
    NeverSmoked,
    Smokes,
    Unknown,
}

/// Fully validated assessment input.
///
/// Created once per request and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct RawAssessmentInput {
    pub age: PositiveReal,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub avg_glucose_level: PositiveReal,
    pub bmi: PositiveReal,
    pub gender: Gender,
    pub ever_married: EverMarried,
    pub work_type: WorkType,
    pub residence_type: ResidenceType,
    pub smoking_status: SmokingStatus,
}

impl RawAssessmentInput {
    /// Validate and coerce a submitted form.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::Validation` naming the first field that is missing or fails its
    /// type/range constraint.
    pub fn from_form(form: &AssessmentForm) -> ScoringResult<Self> {
        Ok(Self {
            age: positive_real("age", form.age.as_ref())?,
            hypertension: flag("hypertension", form.hypertension.as_ref())?,
            heart_disease: flag("heart_disease", form.heart_disease.as_ref())?,
            avg_glucose_level: positive_real(
                "avg_glucose_level",
                form.avg_glucose_level.as_ref(),
            )?,
            bmi: positive_real("bmi", form.bmi.as_ref())?,
            gender: category("gender", form.gender.as_ref(), parse_gender)?,
            ever_married: category("ever_married", form.ever_married.as_ref(), parse_married)?,
            work_type: category("work_type", form.work_type.as_ref(), parse_work_type)?,
            residence_type: category(
                "residence_type",
                form.residence_type.as_ref(),
                parse_residence,
            )?,
            smoking_status: category(
                "smoking_status",
                form.smoking_status.as_ref(),
                parse_smoking,
            )?,
        })
    }
}

fn required<'a>(
    field: &'static str,
    value: Option<&'a FormValue>,
) -> ScoringResult<&'a FormValue> {
    value.ok_or_else(|| ScoringError::validation(field, "field is required"))
}

fn positive_real(field: &'static str, value: Option<&FormValue>) -> ScoringResult<PositiveReal> {
    let parsed = match required(field, value)? {
        FormValue::Number(n) => PositiveReal::new(*n),
        FormValue::Text(s) => PositiveReal::parse(s),
        FormValue::Flag(_) => {
            return Err(ScoringError::validation(field, "expected a number, got a boolean"))
        }
    };
    parsed.map_err(|e| ScoringError::validation(field, e.to_string()))
}

fn flag(field: &'static str, value: Option<&FormValue>) -> ScoringResult<bool> {
    match required(field, value)? {
        FormValue::Flag(b) => Ok(*b),
        FormValue::Number(n) if *n == 1.0 => Ok(true),
        FormValue::Number(n) if *n == 0.0 => Ok(false),
        FormValue::Number(n) => Err(ScoringError::validation(
            field,
            format!("expected 0 or 1, got {n}"),
        )),
        FormValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" => Ok(true),
            "0" | "no" | "false" => Ok(false),
            other => Err(ScoringError::validation(
                field,
                format!("expected 0 or 1, got '{other}'"),
            )),
        },
    }
}

fn category<T>(
    field: &'static str,
    value: Option<&FormValue>,
    parse: fn(&str) -> Option<T>,
) -> ScoringResult<T> {
    let text = match required(field, value)? {
        FormValue::Text(s) => s,
        _ => return Err(ScoringError::validation(field, "expected a text value")),
    };
    parse(&normalise(text))
        .ok_or_else(|| ScoringError::validation(field, format!("unrecognised value '{text}'")))
}

/// Lowercase and collapse `-`, `_` and whitespace runs into single spaces.
fn normalise(text: &str) -> String {
    text.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn parse_gender(value: &str) -> Option<Gender> {
    match value {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        "other" => Some(Gender::Other),
        _ => None,
    }
}

fn parse_married(value: &str) -> Option<EverMarried> {
    match value {
        "yes" => Some(EverMarried::Yes),
        "no" => Some(EverMarried::No),
        _ => None,
    }
}

fn parse_work_type(value: &str) -> Option<WorkType> {
    match value {
        "private" => Some(WorkType::Private),
        "self employed" => Some(WorkType::SelfEmployed),
        "children" => Some(WorkType::Children),
        "never worked" => Some(WorkType::NeverWorked),
        "govt job" | "government job" => Some(WorkType::GovtJob),
        _ => None,
    }
}

fn parse_residence(value: &str) -> Option<ResidenceType> {
    match value {
        "urban" => Some(ResidenceType::Urban),
        "rural" => Some(ResidenceType::Rural),
        _ => None,
    }
}

fn parse_smoking(value: &str) -> Option<SmokingStatus> {
    match value {
        "formerly smoked" => Some(SmokingStatus::FormerlySmoked),
        "never smoked" => Some(SmokingStatus::NeverSmoked),
        "smokes" => Some(SmokingStatus::Smokes),
        "unknown" => Some(SmokingStatus::Unknown),
        _ => None,
    }
}
