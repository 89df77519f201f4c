//! Application layer: Use cases orchestrating domain and ports.
//!
//! - `registry`: startup loading of all disease models (all-or-nothing)
//! - `collector`: per-panel raw input collection
//! - `prediction`: validation and dispatch to the matching model

mod collector;
mod prediction;
mod registry;

pub use collector::FieldCollector;
pub use prediction::{dispatch, PredictionService};
pub use registry::ModelRegistry;
