//! Prediction outcome types.
//!
//! Represents the classifier's binary label and its rendering as a sentence.

use serde::{Deserialize, Serialize};

use super::panel::Disease;

/// Binary classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Interpret a raw model label. Only `1` is positive.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        if raw == 1 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// Result of one submission, consumed immediately by display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub disease: Disease,
    pub label: Label,
    /// Label exactly as returned by the classifier.
    pub raw_label: i64,
}

impl PredictionOutcome {
    #[must_use]
    pub fn new(disease: Disease, raw_label: i64) -> Self {
        Self {
            disease,
            label: Label::from_raw(raw_label),
            raw_label,
        }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.label == Label::Positive
    }

    /// Human-readable sentence for the outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self.label {
            Label::Positive => format!("The person has {}.", self.disease.display_name()),
            Label::Negative => format!("The person does not have {}.", self.disease.display_name()),
        }
    }
}

impl std::fmt::Display for PredictionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(Label::from_raw(1), Label::Positive);
        assert_eq!(Label::from_raw(0), Label::Negative);
        assert_eq!(Label::from_raw(2), Label::Negative);
        assert_eq!(Label::from_raw(-1), Label::Negative);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PredictionOutcome::new(Disease::Diabetes, 1).message(),
            "The person has diabetes."
        );
        assert_eq!(
            PredictionOutcome::new(Disease::HeartDisease, 0).message(),
            "The person does not have heart disease."
        );
        assert_eq!(
            PredictionOutcome::new(Disease::Parkinsons, 1).to_string(),
            "The person has Parkinson’s disease."
        );
    }

    #[test]
    fn test_unexpected_label_uses_negative_phrasing() {
        let outcome = PredictionOutcome::new(Disease::Diabetes, 7);
        assert!(!outcome.is_positive());
        assert_eq!(outcome.raw_label, 7);
        assert_eq!(outcome.message(), "The person does not have diabetes.");
    }
}
