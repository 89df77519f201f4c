//! Linear classifier adapter: Implementation of `Classifier` over JSON artifacts.
//!
//! Artifacts are exported from the training pipeline as JSON documents that
//! describe a fitted linear model and the standard scaler applied before it.
//!
//! # Decision function
//!
//! `z = intercept + sum(coef[i] * (x[i] - mean[i]) / scale[i])`
//!
//! - `logistic_regression`: positive when `z > 0`, or `sigmoid(z) >= threshold` when set
//! - `linear_svc`: positive when `z > 0`
//!
//! # Integrity
//!
//! Loading checks the artifact against `manifest.json` in the same directory
//! (see [`crate::adapters::manifest`]).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::manifest::verify_artifact;
use crate::ports::{Classifier, ModelError, ModelLoader};

/// Upper bound on features, used as a sanity check on artifacts.
const MAX_FEATURES: usize = 256;

/// Family of the fitted linear model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    LinearSvc,
}

/// Standardization applied to raw features before the linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

/// Linear model parameters exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub kind: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Scaler>,
    /// Labels for the negative and positive side of the decision boundary.
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
    /// Probability threshold; logistic regression only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl LinearModel {
    /// Parse and sanity-check an artifact.
    ///
    /// # Errors
    /// Returns `ModelError::Format` if the JSON is malformed or inconsistent.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: LinearModel =
            serde_json::from_slice(bytes).map_err(|e| ModelError::Format(e.to_string()))?;
        model.check()?;
        Ok(model)
    }

    /// Validate parameter shapes and values.
    ///
    /// # Errors
    /// Returns `ModelError::Format` describing the first inconsistency found.
    pub fn check(&self) -> Result<(), ModelError> {
        let n = self.feature_names.len();
        if n == 0 || n > MAX_FEATURES {
            return Err(ModelError::Format(format!(
                "Invalid feature count in model: got {n}, max {MAX_FEATURES}"
            )));
        }
        if self.coefficients.len() != n {
            return Err(ModelError::Format(format!(
                "{} coefficients for {n} features",
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Format("Non-finite model parameter".into()));
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ModelError::Format(
                    "Scaler lengths do not match feature_names length".into(),
                ));
            }
            if scaler.mean.iter().any(|m| !m.is_finite())
                || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
            {
                return Err(ModelError::Format(
                    "Scaler must be finite with non-zero scale".into(),
                ));
            }
        }

        if let Some(t) = self.threshold {
            if self.kind != ModelKind::LogisticRegression {
                return Err(ModelError::Format(
                    "threshold is only valid for logistic_regression".into(),
                ));
            }
            if !(t > 0.0 && t < 1.0) {
                return Err(ModelError::Format(format!("threshold {t} outside (0, 1)")));
            }
        }

        Ok(())
    }

    /// Signed distance from the decision boundary.
    #[must_use]
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        let linear: f64 = match &self.scaler {
            Some(scaler) => x
                .iter()
                .zip(&self.coefficients)
                .zip(scaler.mean.iter().zip(&scaler.scale))
                .map(|((xi, c), (m, s))| c * (xi - m) / s)
                .sum(),
            None => x.iter().zip(&self.coefficients).map(|(xi, c)| c * xi).sum(),
        };
        self.intercept + linear
    }

    /// Positive-class probability (logistic regression only).
    #[must_use]
    pub fn predict_proba(&self, x: &[f64]) -> Option<f64> {
        match self.kind {
            ModelKind::LogisticRegression => Some(sigmoid(self.decision_function(x))),
            ModelKind::LinearSvc => None,
        }
    }

    fn predict_one(&self, x: &[f64]) -> i64 {
        let positive = match self.kind {
            ModelKind::LogisticRegression => match self.threshold {
                Some(t) => sigmoid(self.decision_function(x)) >= t,
                None => self.decision_function(x) > 0.0,
            },
            ModelKind::LinearSvc => self.decision_function(x) > 0.0,
        };
        if positive {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearModel {
    fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    fn predict(&self, samples: &[&[f64]]) -> Vec<i64> {
        samples.iter().map(|x| self.predict_one(x)).collect()
    }

    fn describe(&self) -> String {
        let kind = match self.kind {
            ModelKind::LogisticRegression => "logistic_regression",
            ModelKind::LinearSvc => "linear_svc",
        };
        format!("{kind}({} features)", self.n_features())
    }
}

/// Loads [`LinearModel`] artifacts from the filesystem.
#[derive(Debug, Clone, Default)]
pub struct JsonModelLoader {
    require_manifest: bool,
}

impl JsonModelLoader {
    #[must_use]
    pub fn new(require_manifest: bool) -> Self {
        Self { require_manifest }
    }

    /// Load a concrete `LinearModel` (verified against the manifest).
    ///
    /// # Errors
    /// Returns `ModelError` if the file is missing, unreadable, fails the
    /// integrity check, or is malformed.
    pub fn load_linear(&self, path: &Path) -> Result<LinearModel, ModelError> {
        if !path.is_file() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        verify_artifact(path, &bytes, self.require_manifest)?;
        let model = LinearModel::from_slice(&bytes)?;

        tracing::info!("Loaded model from {:?} ({})", path, model.describe());
        Ok(model)
    }
}

impl ModelLoader for JsonModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
        Ok(Box::new(self.load_linear(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::manifest::Manifest;

    fn two_feature_model(kind: ModelKind) -> LinearModel {
        LinearModel {
            kind,
            description: None,
            feature_names: vec!["a".into(), "b".into()],
            coefficients: vec![2.0, -1.0],
            intercept: -0.5,
            scaler: None,
            classes: [0, 1],
            threshold: None,
        }
    }

    fn write_model(dir: &Path, name: &str, model: &LinearModel) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_vec_pretty(model).expect("serialize")).expect("write");
        path
    }

    #[test]
    fn test_decision_function_without_scaler() {
        let model = two_feature_model(ModelKind::LinearSvc);
        // -0.5 + 2*1 - 1*1 = 0.5
        assert!((model.decision_function(&[1.0, 1.0]) - 0.5).abs() < 1e-12);
        let above: &[f64] = &[1.0, 1.0];
        let below: &[f64] = &[0.0, 1.0];
        assert_eq!(model.predict(&[above, below]), vec![1, 0]);
    }

    #[test]
    fn test_decision_function_with_scaler() {
        let mut model = two_feature_model(ModelKind::LinearSvc);
        model.scaler = Some(Scaler {
            mean: vec![10.0, 0.0],
            scale: vec![5.0, 2.0],
        });
        // -0.5 + 2*(20-10)/5 - 1*(4-0)/2 = -0.5 + 4 - 2 = 1.5
        assert!((model.decision_function(&[20.0, 4.0]) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_threshold() {
        let mut model = two_feature_model(ModelKind::LogisticRegression);
        // z = 0.5 -> p ~ 0.622
        let x: &[f64] = &[1.0, 1.0];
        let p = model.predict_proba(x).expect("logistic has proba");
        assert!((p - 0.622_459).abs() < 1e-5);
        assert_eq!(model.predict(&[x]), vec![1]);

        model.threshold = Some(0.7);
        assert_eq!(model.predict(&[x]), vec![0]);
    }

    #[test]
    fn test_custom_classes() {
        let mut model = two_feature_model(ModelKind::LinearSvc);
        model.classes = [-1, 1];
        let origin: &[f64] = &[0.0, 0.0];
        assert_eq!(model.predict(&[origin]), vec![-1]);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = two_feature_model(ModelKind::LogisticRegression);
        let x: &[f64] = &[0.3, 0.1];
        assert_eq!(model.predict(&[x]), model.predict(&[x]));
    }

    #[test]
    fn test_check_rejects_inconsistent_models() {
        let mut model = two_feature_model(ModelKind::LinearSvc);
        model.coefficients.push(1.0);
        assert!(model.check().is_err());

        let mut model = two_feature_model(ModelKind::LinearSvc);
        model.scaler = Some(Scaler {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        });
        assert!(model.check().is_err());

        let mut model = two_feature_model(ModelKind::LinearSvc);
        model.threshold = Some(0.5);
        assert!(model.check().is_err());

        let mut model = two_feature_model(ModelKind::LogisticRegression);
        model.feature_names.clear();
        model.coefficients.clear();
        assert!(model.check().is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = LinearModel::from_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, ModelError::Format(_)));
    }

    #[test]
    fn test_loader_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = JsonModelLoader::new(false)
            .load(&dir.path().join("absent.json"))
            .err()
            .expect("Should fail");
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_loader_with_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let model = two_feature_model(ModelKind::LinearSvc);
        let path = write_model(dir.path(), "m.json", &model);
        Manifest::build(dir.path())
            .expect("build")
            .write(dir.path())
            .expect("write");

        let loaded = JsonModelLoader::new(true)
            .load_linear(&path)
            .expect("Should load");
        assert_eq!(loaded, model);

        // Modify after signing: must be rejected.
        let mut changed = model.clone();
        changed.intercept = 3.0;
        write_model(dir.path(), "m.json", &changed);
        let err = JsonModelLoader::new(false).load(&path).err().expect("Should fail");
        assert!(matches!(err, ModelError::Integrity(_)));
    }

    #[test]
    fn test_shipped_demo_models_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let loader = JsonModelLoader::new(true);

        let diabetes = loader
            .load_linear(&dir.join("diabetes.json"))
            .expect("diabetes model");
        assert_eq!(diabetes.n_features(), 8);
        let positive: &[f64] = &[2.0, 150.0, 80.0, 30.0, 100.0, 28.5, 0.5, 45.0];
        let negative: &[f64] = &[1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.35, 31.0];
        assert_eq!(diabetes.predict(&[positive, negative]), vec![1, 0]);

        let heart = loader.load_linear(&dir.join("heart.json")).expect("heart model");
        assert_eq!(heart.n_features(), 13);

        let parkinsons = loader
            .load_linear(&dir.join("parkinsons.json"))
            .expect("parkinsons model");
        assert_eq!(parkinsons.n_features(), 22);
    }
}
