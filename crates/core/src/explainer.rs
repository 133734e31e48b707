//! Risk factor explanation.
//!
//! A small rule table over the raw inputs picks out the factors worth showing next to a risk
//! estimate. It does not look at the classifier at all: the rules are meant to be easy to audit,
//! not to reproduce the model's feature attributions.

use crate::config::ExplainerThresholds;
use crate::input::{RawAssessmentInput, SmokingStatus};
use serde::Serialize;

/// Displayed value of a risk factor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FactorValue {
    Whole(i64),
    Measurement(f64),
    Text(&'static str),
}

impl std::fmt::Display for FactorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Whole(v) => write!(f, "{v}"),
            Self::Measurement(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// One contributing factor; a higher `impact` is more severe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiskFactor {
    pub name: &'static str,
    pub value: FactorValue,
    pub impact: u8,
}

impl RiskFactor {
    fn new(name: &'static str, value: FactorValue, impact: u8) -> Self {
        Self {
            name,
            value,
            impact,
        }
    }
}

/// Rank the contributing factors for `raw`, most severe first, at most `max_factors` long.
///
/// Factors with equal impact keep rule order: age, hypertension, heart disease, BMI, glucose,
/// smoking.
pub fn explain(
    raw: &RawAssessmentInput,
    thresholds: &ExplainerThresholds,
    max_factors: usize,
) -> Vec<RiskFactor> {
    let age = raw.age.get();
    let bmi = raw.bmi.get();
    let glucose = raw.avg_glucose_level.get();

    let mut factors = Vec::new();

    if age > thresholds.advanced_age {
        factors.push(RiskFactor::new(
            "Advanced Age",
            FactorValue::Whole(age.trunc() as i64),
            3,
        ));
    }
    if raw.hypertension {
        factors.push(RiskFactor::new("Hypertension", FactorValue::Text("Yes"), 3));
    }
    if raw.heart_disease {
        factors.push(RiskFactor::new("Heart Disease", FactorValue::Text("Yes"), 3));
    }
    if bmi >= thresholds.high_bmi {
        factors.push(RiskFactor::new("High BMI", FactorValue::Measurement(bmi), 2));
    } else if bmi >= thresholds.overweight_bmi {
        factors.push(RiskFactor::new("Overweight", FactorValue::Measurement(bmi), 1));
    }
    if glucose > thresholds.high_glucose {
        factors.push(RiskFactor::new(
            "High Glucose",
            FactorValue::Measurement(glucose),
            2,
        ));
    }
    if raw.smoking_status == SmokingStatus::Smokes {
        factors.push(RiskFactor::new(
            "Smoking",
            FactorValue::Text("Currently smokes"),
            2,
        ));
    }

    // Vec::sort_by is stable.
    factors.sort_by(|a, b| b.impact.cmp(&a.impact));
    factors.truncate(max_factors);
    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{EverMarried, Gender, ResidenceType, WorkType};
    use stroke_types::PositiveReal;

    fn input(
        age: f64,
        hypertension: bool,
        heart_disease: bool,
        glucose: f64,
        bmi: f64,
        smoking: SmokingStatus,
    ) -> RawAssessmentInput {
        RawAssessmentInput {
            age: PositiveReal::new(age).unwrap(),
            hypertension,
            heart_disease,
            avg_glucose_level: PositiveReal::new(glucose).unwrap(),
            bmi: PositiveReal::new(bmi).unwrap(),
            gender: Gender::Male,
            ever_married: EverMarried::Yes,
            work_type: WorkType::Private,
            residence_type: ResidenceType::Urban,
            smoking_status: smoking,
        }
    }

    fn names(factors: &[RiskFactor]) -> Vec<&'static str> {
        factors.iter().map(|f| f.name).collect()
    }

    fn run(raw: &RawAssessmentInput) -> Vec<RiskFactor> {
        explain(raw, &ExplainerThresholds::default(), 3)
    }

    #[test]
    fn scenario_a_keeps_rule_order_among_ties() {
        let raw = input(65.0, true, true, 160.0, 32.0, SmokingStatus::Smokes);
        let factors = run(&raw);
        assert_eq!(
            factors,
            vec![
                RiskFactor::new("Advanced Age", FactorValue::Whole(65), 3),
                RiskFactor::new("Hypertension", FactorValue::Text("Yes"), 3),
                RiskFactor::new("Heart Disease", FactorValue::Text("Yes"), 3),
            ]
        );
    }

    #[test]
    fn scenario_b_bmi_of_25_is_overweight() {
        let raw = input(50.0, false, false, 100.0, 25.0, SmokingStatus::NeverSmoked);
        let factors = run(&raw);
        assert_eq!(
            factors,
            vec![RiskFactor::new("Overweight", FactorValue::Measurement(25.0), 1)]
        );
    }

    #[test]
    fn lower_impact_factors_are_ranked_after_higher_ones() {
        let raw = input(45.0, false, true, 150.0, 27.0, SmokingStatus::Smokes);
        assert_eq!(
            names(&run(&raw)),
            vec!["Heart Disease", "High Glucose", "Smoking"]
        );
    }

    #[test]
    fn fewer_than_three_are_not_padded() {
        let raw = input(30.0, false, false, 90.0, 22.0, SmokingStatus::NeverSmoked);
        assert!(run(&raw).is_empty());

        let raw = input(30.0, true, false, 90.0, 22.0, SmokingStatus::Unknown);
        assert_eq!(names(&run(&raw)), vec!["Hypertension"]);
    }

    #[test]
    fn bmi_factors_are_mutually_exclusive() {
        for bmi in [24.9, 25.0, 29.9, 30.0, 45.0] {
            let raw = input(30.0, false, false, 90.0, bmi, SmokingStatus::Unknown);
            let found = names(&run(&raw));
            assert!(
                !(found.contains(&"High BMI") && found.contains(&"Overweight")),
                "bmi {bmi} produced {found:?}"
            );
        }
        let raw = input(30.0, false, false, 90.0, 30.0, SmokingStatus::Unknown);
        assert_eq!(names(&run(&raw)), vec!["High BMI"]);
        let raw = input(30.0, false, false, 90.0, 24.9, SmokingStatus::Unknown);
        assert!(run(&raw).is_empty());
    }

    #[test]
    fn strict_cutoffs_for_age_and_glucose() {
        let raw = input(60.0, false, false, 140.0, 20.0, SmokingStatus::Unknown);
        assert!(run(&raw).is_empty());

        let raw = input(60.5, false, false, 140.1, 20.0, SmokingStatus::Unknown);
        let factors = run(&raw);
        assert_eq!(names(&factors), vec!["Advanced Age", "High Glucose"]);
        assert_eq!(factors[0].value, FactorValue::Whole(60));
    }

    #[test]
    fn never_more_than_max_factors() {
        let raw = input(80.0, true, true, 250.0, 40.0, SmokingStatus::Smokes);
        assert_eq!(run(&raw).len(), 3);
        assert_eq!(explain(&raw, &ExplainerThresholds::default(), 1).len(), 1);
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let thresholds = ExplainerThresholds {
            advanced_age: 50.0,
            ..ExplainerThresholds::default()
        };
        let raw = input(55.0, false, false, 90.0, 20.0, SmokingStatus::Unknown);
        assert_eq!(names(&explain(&raw, &thresholds, 3)), vec!["Advanced Age"]);
    }

    #[test]
    fn factor_values_serialise_as_numbers_or_text() {
        let factor = RiskFactor::new("Advanced Age", FactorValue::Whole(65), 3);
        let json = serde_json::to_string(&factor).unwrap();
        assert_eq!(json, r#"{"name":"Advanced Age","value":65,"impact":3}"#);
        let json = serde_json::to_string(&FactorValue::Text("Yes")).unwrap();
        assert_eq!(json, r#""Yes""#);
        let json = serde_json::to_string(&FactorValue::Measurement(32.5)).unwrap();
        assert_eq!(json, "32.5");
    }
}
