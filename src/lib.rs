//! # medpredict
//!
//! Terminal screening tool that turns clinical measurements into a binary
//! disease prediction (diabetes, heart disease, Parkinson's) using three
//! pre-trained linear classifiers.
//!
//! This crate provides:
//! - Static disease panels describing the ordered measurement fields
//! - All-or-nothing numeric validation with a per-field report
//! - Dispatch of validated vectors to the matching classifier
//! - Terminal UI for local form entry
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (panels, raw inputs, validated vectors, outcomes)
//! - `ports`: Trait definitions for external collaborators (classifier, loader)
//! - `adapters`: Concrete implementations (JSON linear models, integrity manifest)
//! - `application`: Use cases (model registry, field collection, prediction)
//! - `config`: Environment-driven configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

use std::path::PathBuf;

pub use domain::{Disease, DiseasePanel, Label, PredictionOutcome, RawInputSet, ValidatedVector};

/// Result type for medpredict operations
pub type Result<T> = std::result::Result<T, PredictorError>;

/// Main error type for medpredict
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("Failed to load {disease} model from {path:?}: {source}")]
    ModelLoad {
        disease: Disease,
        path: PathBuf,
        #[source]
        source: ports::ModelError,
    },

    #[error("{disease} model expects {actual} features but the panel declares {expected}")]
    FeatureCountMismatch {
        disease: Disease,
        expected: usize,
        actual: usize,
    },

    #[error("Model not loaded: {0}")]
    ModelNotLoaded(Disease),

    #[error("{0} model returned no prediction")]
    EmptyPrediction(Disease),

    #[error(transparent)]
    Validation(#[from] domain::ValidationFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
