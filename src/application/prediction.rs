//! Prediction service: Validation followed by dispatch to the disease model.
//!
//! One call per submission. Nothing is cached or batched across requests,
//! and the service holds no state besides the shared, read-only registry.

use std::sync::Arc;

use crate::application::ModelRegistry;
use crate::domain::{
    validate, validate_fields, Disease, PredictionOutcome, RawInputSet, ValidatedVector,
    ValidationFailure, ValidationReport,
};
use crate::ports::Classifier;
use crate::PredictorError;

/// Run `model` on `vector` as a single-sample batch.
///
/// # Errors
/// Returns `FeatureCountMismatch` if the vector does not fit the model and
/// `EmptyPrediction` if the model returns no label.
pub fn dispatch(
    model: &dyn Classifier,
    vector: &ValidatedVector,
) -> Result<PredictionOutcome, PredictorError> {
    let disease = vector.disease();
    if vector.len() != model.n_features() {
        return Err(PredictorError::FeatureCountMismatch {
            disease,
            expected: vector.len(),
            actual: model.n_features(),
        });
    }

    let labels = model.predict(&[vector.as_slice()]);
    let raw_label = labels
        .first()
        .copied()
        .ok_or(PredictorError::EmptyPrediction(disease))?;

    Ok(PredictionOutcome::new(disease, raw_label))
}

/// Service for turning form submissions into prediction outcomes.
#[derive(Debug, Clone)]
pub struct PredictionService {
    registry: Arc<ModelRegistry>,
}

impl PredictionService {
    /// Create a new prediction service over a loaded registry.
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Per-field validation report for a panel's raw input.
    #[must_use]
    pub fn report(&self, disease: Disease, raw: &RawInputSet) -> ValidationReport {
        validate_fields(disease.panel(), raw)
    }

    /// All-or-nothing conversion of raw input into a vector.
    ///
    /// # Errors
    /// Returns `ValidationFailure` if any slot fails to parse.
    pub fn validate(
        &self,
        disease: Disease,
        raw: &RawInputSet,
    ) -> Result<ValidatedVector, ValidationFailure> {
        validate(disease.panel(), raw)
    }

    /// Predict for an already validated vector.
    ///
    /// # Errors
    /// Returns error if the model is missing or rejects the vector shape.
    pub fn predict(&self, vector: &ValidatedVector) -> Result<PredictionOutcome, PredictorError> {
        let model = self.registry.get(vector.disease())?;
        dispatch(model, vector)
    }

    /// Validate then predict: the full submit workflow for one panel.
    ///
    /// # Errors
    /// Returns `PredictorError::Validation` without touching the model when
    /// any field is invalid.
    pub fn submit(
        &self,
        disease: Disease,
        raw: &RawInputSet,
    ) -> Result<PredictionOutcome, PredictorError> {
        let vector = self.validate(disease, raw).map_err(|failure| {
            tracing::debug!(
                "Validation failed for {} panel: {} invalid field(s)",
                disease,
                failure.invalid.len()
            );
            failure
        })?;

        let outcome = self.predict(&vector)?;
        tracing::info!(
            "Prediction complete: disease={}, features={}, label={}",
            disease.key(),
            vector.len(),
            outcome.raw_label
        );
        Ok(outcome)
    }
}
