//! Loading of the fitted scaler and classifier artifacts.
//!
//! Artifacts are produced offline and read exactly once at process startup. Both are checked
//! against the encoder's feature layout before they are accepted: each must describe exactly
//! [`FEATURE_COUNT`] features and, where the artifact records the feature names it was fitted
//! on, those names must match [`FEATURE_NAMES`] in order.

use crate::classifier::{ClassifierArtifact, ProbabilisticClassifier};
use crate::config::ArtifactPaths;
use crate::constants::{FEATURE_COUNT, FEATURE_NAMES};
use crate::scaler::{ScalerArtifact, StandardScaler};
use crate::{ScoringError, ScoringResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// The fitted scaler and classifier, immutable once loaded.
#[derive(Debug)]
pub struct ArtifactSet {
    scaler: StandardScaler,
    classifier: Box<dyn ProbabilisticClassifier>,
}

impl ArtifactSet {
    /// Pair an already built scaler and classifier.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::ArtifactInvalid` if the classifier was fitted on a different
    /// number of features than the encoder produces.
    pub fn new(
        scaler: StandardScaler,
        classifier: Box<dyn ProbabilisticClassifier>,
    ) -> ScoringResult<Self> {
        if classifier.n_features() != FEATURE_COUNT {
            return Err(ScoringError::ArtifactInvalid(format!(
                "classifier expects {} features, encoder produces {FEATURE_COUNT}",
                classifier.n_features()
            )));
        }
        Ok(Self { scaler, classifier })
    }

    /// Read, parse and validate both artifacts.
    pub fn load(paths: &ArtifactPaths) -> ScoringResult<Self> {
        let scaler_artifact: ScalerArtifact = read_json(paths.scaler())?;
        check_feature_names("scaler", scaler_artifact.feature_names.as_deref())?;
        let scaler = StandardScaler::from_artifact(scaler_artifact)?;

        let classifier_artifact = load_classifier_artifact(paths.model())?;
        let classifier = classifier_artifact.into_classifier()?;

        tracing::info!(
            "loaded {} classifier ({} features) from {}",
            classifier.kind(),
            classifier.n_features(),
            paths.model().display()
        );
        tracing::info!("loaded scaler from {}", paths.scaler().display());

        Self::new(scaler, classifier)
    }

    /// The fitted scaler.
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// The fitted classifier, whichever kind the artifact held.
    pub fn classifier(&self) -> &dyn ProbabilisticClassifier {
        self.classifier.as_ref()
    }
}

/// Read and parse a classifier artifact without building the runtime model.
///
/// Used for inspection as well as by [`ArtifactSet::load`]; the feature names are already
/// checked against the encoder layout.
pub fn load_classifier_artifact(path: &Path) -> ScoringResult<ClassifierArtifact> {
    let artifact: ClassifierArtifact = read_json(path)?;
    check_feature_names("classifier", artifact.feature_names())?;
    Ok(artifact)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ScoringResult<T> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScoringError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ScoringError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_feature_names(artifact: &str, names: Option<&[String]>) -> ScoringResult<()> {
    let Some(names) = names else {
        return Ok(());
    };
    if names.len() != FEATURE_COUNT {
        return Err(ScoringError::ArtifactInvalid(format!(
            "{artifact} lists {} feature names, expected {FEATURE_COUNT}",
            names.len()
        )));
    }
    for (i, (found, expected)) in names.iter().zip(FEATURE_NAMES.iter()).enumerate() {
        if found != expected {
            return Err(ScoringError::ArtifactInvalid(format!(
                "{artifact} feature {i} is '{found}', expected '{expected}'"
            )));
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_reads_both_artifacts() {
        let temp = TempDir::new().unwrap();
        let scaler = write_scaler(temp.path(), 0.0, 1.0);
        let model = write_logistic(temp.path(), [0.0; FEATURE_COUNT], 0.0);

        let set = ArtifactSet::load(&ArtifactPaths::new(model, scaler)).expect("load artifacts");
        assert_eq!(set.classifier().kind(), "logistic_regression");
        assert_eq!(set.scaler().scale(), &[1.0; FEATURE_COUNT]);
    }

    #[test]
    fn missing_model_file_is_a_read_error() {
        let temp = TempDir::new().unwrap();
        let scaler = write_scaler(temp.path(), 0.0, 1.0);
        let model = temp.path().join("missing.json");

        let err = ArtifactSet::load(&ArtifactPaths::new(&model, scaler)).expect_err("no model");
        assert!(matches!(err, ScoringError::ArtifactRead { path, .. } if path == model));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let scaler = temp.path().join("scaler.json");
        fs::write(&scaler, "not json").unwrap();
        let model = write_logistic(temp.path(), [0.0; FEATURE_COUNT], 0.0);

        let err = ArtifactSet::load(&ArtifactPaths::new(model, scaler)).expect_err("bad scaler");
        assert!(matches!(err, ScoringError::ArtifactParse { .. }));
    }

    #[test]
    fn unknown_classifier_kind_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let model = temp.path().join("stroke_model.json");
        fs::write(&model, r#"{"kind": "svm", "support_vectors": []}"#).unwrap();

        let err = load_classifier_artifact(&model).expect_err("unsupported kind");
        assert!(matches!(err, ScoringError::ArtifactParse { .. }));
    }

    #[test]
    fn reordered_feature_names_are_rejected() {
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        names.swap(13, 14);
        let err = check_feature_names("scaler", Some(names.as_slice())).expect_err("swapped names");
        assert!(matches!(err, ScoringError::ArtifactInvalid(msg) if msg.contains("feature 13")));
    }

    #[test]
    fn matching_feature_names_are_accepted() {
        let names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        assert!(check_feature_names("classifier", Some(names.as_slice())).is_ok());
        assert!(check_feature_names("classifier", None).is_ok());
    }

    #[test]
    fn short_feature_name_list_is_rejected() {
        let names = vec!["age".to_string()];
        let err = check_feature_names("classifier", Some(names.as_slice())).expect_err("one name");
        assert!(matches!(err, ScoringError::ArtifactInvalid(msg) if msg.contains("1 feature names")));
    }
}
