//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual model artifact handling:
//! - `linear`: JSON-serialized linear classifiers (logistic regression, linear SVC)
//! - `manifest`: SHA-256 integrity manifest for artifact directories

pub mod linear;
pub mod manifest;

pub use linear::{JsonModelLoader, LinearModel, ModelKind};
pub use manifest::Manifest;
