//! Model registry: the immutable disease -> model lookup built at startup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ModelConfig;
use crate::domain::Disease;
use crate::ports::{Classifier, ModelLoader};
use crate::PredictorError;

/// Loaded models, one per disease.
///
/// Construction is all-or-nothing: a registry always holds a model for every
/// disease, each accepting exactly as many features as its panel has fields.
pub struct ModelRegistry {
    models: HashMap<Disease, Arc<dyn Classifier>>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for disease in Disease::ALL {
            if let Some(model) = self.models.get(&disease) {
                map.entry(&disease, &model.describe());
            }
        }
        map.finish()
    }
}

impl ModelRegistry {
    /// Load every disease model through `loader`.
    ///
    /// # Errors
    /// Returns the first `ModelLoad` or `FeatureCountMismatch` error; no
    /// partial registry is ever returned.
    pub fn load<L>(config: &ModelConfig, loader: &L) -> Result<Self, PredictorError>
    where
        L: ModelLoader + ?Sized,
    {
        tracing::info!("Loading {} disease models...", Disease::ALL.len());

        let mut models: Vec<(Disease, Arc<dyn Classifier>)> = Vec::with_capacity(Disease::ALL.len());
        for disease in Disease::ALL {
            let path = config.path_for(disease);
            let model = loader.load(&path).map_err(|source| {
                tracing::error!("Failed to load {} model from {:?}: {}", disease, path, source);
                PredictorError::ModelLoad {
                    disease,
                    path: path.clone(),
                    source,
                }
            })?;
            models.push((disease, Arc::from(model)));
        }

        let registry = Self::from_models(models)?;
        tracing::info!("All disease models loaded: {:?}", registry);
        Ok(registry)
    }

    /// Build a registry from already-loaded models.
    ///
    /// # Errors
    /// Returns `ModelNotLoaded` if a disease is missing, or
    /// `FeatureCountMismatch` if a model does not fit its panel.
    pub fn from_models<I>(models: I) -> Result<Self, PredictorError>
    where
        I: IntoIterator<Item = (Disease, Arc<dyn Classifier>)>,
    {
        let models: HashMap<Disease, Arc<dyn Classifier>> = models.into_iter().collect();

        for disease in Disease::ALL {
            let model = models
                .get(&disease)
                .ok_or(PredictorError::ModelNotLoaded(disease))?;
            let expected = disease.panel().len();
            let actual = model.n_features();
            if expected != actual {
                return Err(PredictorError::FeatureCountMismatch {
                    disease,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self { models })
    }

    /// Look up the model for `disease`.
    ///
    /// # Errors
    /// Returns `ModelNotLoaded` if no model is registered.
    pub fn get(&self, disease: Disease) -> Result<&dyn Classifier, PredictorError> {
        self.models
            .get(&disease)
            .map(|m| &**m)
            .ok_or(PredictorError::ModelNotLoaded(disease))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
