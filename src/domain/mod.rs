//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! Panels are static; raw inputs only become vectors through validation.

mod input;
mod outcome;
mod panel;

pub use input::{
    validate, validate_fields, FieldError, FieldReport, RawInputSet, RawValue, ValidatedVector,
    ValidationFailure, ValidationReport, VALIDATION_MESSAGE,
};
pub use outcome::{Label, PredictionOutcome};
pub use panel::{
    Choice, Disease, DiseasePanel, FieldKind, FieldSpec, DIABETES_PANEL, HEART_PANEL,
    PARKINSONS_PANEL,
};
