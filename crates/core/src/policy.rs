//! Decision policy: probability to risk label.

use crate::constants::{DEFAULT_DECISION_THRESHOLD, HIGH_RISK_LABEL, LOW_RISK_LABEL};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RiskLabel {
    Low,
    High,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => LOW_RISK_LABEL,
            Self::High => HIGH_RISK_LABEL,
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label `High` iff `probability >= threshold`.
pub fn classify_with_threshold(probability: f64, threshold: f64) -> RiskLabel {
    if probability >= threshold {
        RiskLabel::High
    } else {
        RiskLabel::Low
    }
}

/// Label with the default threshold of [`DEFAULT_DECISION_THRESHOLD`].
pub fn classify(probability: f64) -> RiskLabel {
    classify_with_threshold(probability, DEFAULT_DECISION_THRESHOLD)
}
