//! Classifier port: Trait for pre-trained prediction models.
//!
//! This trait abstracts the model format from the prediction workflow.
//! Handles are loaded once at startup and shared read-only afterwards.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model artifact: {0}")]
    Format(String),

    #[error("Integrity check failed: {0}")]
    Integrity(String),
}

/// A loaded, immutable binary classifier.
///
/// `predict` must be a pure function of its input so handles can be
/// shared across threads without locking.
pub trait Classifier: Send + Sync {
    /// Number of features each sample must carry.
    fn n_features(&self) -> usize;

    /// Predict one raw label per sample.
    ///
    /// Callers guarantee every sample has `n_features()` values.
    fn predict(&self, samples: &[&[f64]]) -> Vec<i64>;

    /// Short description for logs (model kind, feature count).
    fn describe(&self) -> String {
        format!("classifier({} features)", self.n_features())
    }
}

/// Loads a classifier from a storage location.
pub trait ModelLoader {
    /// Load the artifact at `path`.
    ///
    /// # Errors
    /// Returns `ModelError` if the artifact is missing, unreadable, corrupt
    /// or fails its integrity check.
    fn load(&self, path: &Path) -> Result<Box<dyn Classifier>, ModelError>;
}
