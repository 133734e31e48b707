//! Frozen probabilistic classifiers.
//!
//! Two fitted model families are supported, both read from JSON exports of the fitted
//! parameters:
//!
//! - logistic regression: `σ(coef · x + intercept)`
//! - random forest: mean of the positive-class fraction at the leaf each tree reaches
//!
//! Trees use the usual flattened array layout: node `i` is a leaf when
//! `children_left[i] == -1`; otherwise the walk goes left when
//! `x[feature[i]] <= threshold[i]`.

use crate::constants::FEATURE_COUNT;
use crate::scaler::{fixed_length, ScaledFeatureVector};
use crate::{ScoringError, ScoringResult};
use serde::{Deserialize, Serialize};

/// A fitted binary classifier that reports the probability of the positive class.
///
/// Implementations must be deterministic and must not mutate themselves during inference.
pub trait ProbabilisticClassifier: Send + Sync + std::fmt::Debug {
    /// Short identifier of the model family.
    fn kind(&self) -> &'static str;

    /// Number of input features the model was fitted on.
    fn n_features(&self) -> usize;

    /// Probability of the positive class for one scaled feature vector.
    fn predict_probability(&self, features: &ScaledFeatureVector) -> ScoringResult<f64>;
}

/// Serialised classifier, tagged by model family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegressionArtifact),
    RandomForest(RandomForestArtifact),
}

impl ClassifierArtifact {
    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            Self::LogisticRegression(lr) => lr.feature_names.as_deref(),
            Self::RandomForest(rf) => rf.feature_names.as_deref(),
        }
    }

    /// Validate the fitted parameters and build the runtime model.
    pub fn into_classifier(self) -> ScoringResult<Box<dyn ProbabilisticClassifier>> {
        Ok(match self {
            Self::LogisticRegression(lr) => Box::new(LogisticRegression::from_artifact(lr)?),
            Self::RandomForest(rf) => Box::new(RandomForest::from_artifact(rf)?),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionArtifact {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomForestArtifact {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

/// Flattened decision tree.
///
/// `value[i]` holds the `[negative, positive]` class weights at node `i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogisticRegression {
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: [f64; FEATURE_COUNT], intercept: f64) -> ScoringResult<Self> {
        if coef.iter().any(|c| !c.is_finite()) || !intercept.is_finite() {
            return Err(ScoringError::ArtifactInvalid(
                "logistic regression parameters must be finite".into(),
            ));
        }
        Ok(Self { coef, intercept })
    }

    pub fn from_artifact(artifact: LogisticRegressionArtifact) -> ScoringResult<Self> {
        let coef = fixed_length("logistic regression coef", artifact.coef)?;
        Self::new(coef, artifact.intercept)
    }

    pub fn coef(&self) -> &[f64; FEATURE_COUNT] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict_probability(&self, features: &ScaledFeatureVector) -> ScoringResult<f64> {
        let z = features
            .values()
            .iter()
            .zip(self.coef.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;
        if !z.is_finite() {
            return Err(ScoringError::ArithmeticDomain(
                "logistic regression decision value is not finite".into(),
            ));
        }
        Ok(sigmoid(z))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn from_artifact(artifact: RandomForestArtifact) -> ScoringResult<Self> {
        if artifact.n_features != FEATURE_COUNT {
            return Err(ScoringError::ArtifactInvalid(format!(
                "random forest was fitted on {} features, expected {FEATURE_COUNT}",
                artifact.n_features
            )));
        }
        if artifact.trees.is_empty() {
            return Err(ScoringError::ArtifactInvalid(
                "random forest has no trees".into(),
            ));
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            tree.validate()
                .map_err(|reason| ScoringError::ArtifactInvalid(format!("tree {i}: {reason}")))?;
        }
        Ok(Self {
            trees: artifact.trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl ProbabilisticClassifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict_probability(&self, features: &ScaledFeatureVector) -> ScoringResult<f64> {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.positive_fraction(features))
            .sum();
        Ok(total / self.trees.len() as f64)
    }
}

impl DecisionTree {
    /// Check the array layout so that every walk ends at a leaf.
    ///
    /// Children must have a larger index than their parent, which rules out cycles.
    fn validate(&self) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("node arrays have different lengths".into());
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];
            if left == -1 {
                if right != -1 {
                    return Err(format!("node {node} has only one child"));
                }
                let [neg, pos] = self.value[node];
                if !neg.is_finite() || !pos.is_finite() || neg < 0.0 || pos < 0.0 {
                    return Err(format!("leaf {node} has invalid class weights"));
                }
                if neg + pos <= 0.0 {
                    return Err(format!("leaf {node} has no class weight"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(format!("node {node} has out-of-order child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= FEATURE_COUNT as i64 {
                return Err(format!("node {node} splits on unknown feature {feature}"));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }
        Ok(())
    }

    fn positive_fraction(&self, features: &ScaledFeatureVector) -> f64 {
        let x = features.values();
        let mut node = 0usize;
        while self.children_left[node] != -1 {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [neg, pos] = self.value[node];
        pos / (neg + pos)
    }
}
