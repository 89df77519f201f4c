//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the prediction workflow and the model artifacts it consumes.

mod classifier;

pub use classifier::{Classifier, ModelError, ModelLoader};
