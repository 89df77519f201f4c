//! Raw form input and its conversion into a validated feature vector.
//!
//! Validation is all-or-nothing: a [`ValidatedVector`] only exists when every
//! slot of the panel parsed to a finite number. The per-field
//! [`ValidationReport`] is kept so the UI can point at the offending fields.

use super::panel::{Disease, DiseasePanel};

/// Message shown for any validation failure.
pub const VALIDATION_MESSAGE: &str = "Please enter valid numeric values.";

/// One raw slot as produced by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Whatever the user typed.
    Text(String),
    /// Value from a numeric or enumerated widget.
    Number(f64),
}

impl Default for RawValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

/// Ordered raw values, positionally aligned with a panel's fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInputSet {
    values: Vec<RawValue>,
}

impl RawInputSet {
    #[must_use]
    pub fn new(values: Vec<RawValue>) -> Self {
        Self { values }
    }

    /// Build a set from text slots.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            values: texts
                .into_iter()
                .map(|s| RawValue::Text(s.as_ref().to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RawValue> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawValue> {
        self.values.iter()
    }
}

/// Why a single slot failed to parse.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("value is empty")]
    Empty,

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("value is not finite")]
    NonFinite,

    #[error("no value supplied")]
    Missing,
}

/// Parse result for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport {
    pub index: usize,
    pub label: &'static str,
    pub result: Result<f64, FieldError>,
}

/// Raised when any slot of a raw set fails to parse.
///
/// Displays as the single generic message; `invalid` lists field indices.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Please enter valid numeric values.")]
pub struct ValidationFailure {
    pub disease: Disease,
    pub invalid: Vec<usize>,
    /// Slots received beyond the panel's field count.
    pub extra: usize,
}

/// Per-field outcome of validating a raw set against a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub disease: Disease,
    pub fields: Vec<FieldReport>,
    pub extra: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.extra == 0 && self.fields.iter().all(|f| f.result.is_ok())
    }

    /// Indices of fields that failed to parse.
    #[must_use]
    pub fn invalid_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .filter(|f| f.result.is_err())
            .map(|f| f.index)
            .collect()
    }

    /// Collapse into the all-or-nothing contract.
    ///
    /// # Errors
    /// Returns `ValidationFailure` if any field failed or extra slots were supplied.
    pub fn into_vector(self) -> Result<ValidatedVector, ValidationFailure> {
        if !self.is_valid() {
            return Err(ValidationFailure {
                disease: self.disease,
                invalid: self.invalid_indices(),
                extra: self.extra,
            });
        }

        let values = self
            .fields
            .into_iter()
            .filter_map(|f| f.result.ok())
            .collect();

        Ok(ValidatedVector {
            disease: self.disease,
            values,
        })
    }
}

/// Ordered, all-numeric feature vector for one panel.
///
/// Only constructed by validation, so its length always equals the panel's
/// field count.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVector {
    disease: Disease,
    values: Vec<f64>,
}

impl ValidatedVector {
    #[must_use]
    pub fn disease(&self) -> Disease {
        self.disease
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_slot(value: &RawValue) -> Result<f64, FieldError> {
    let parsed = match value {
        RawValue::Number(v) => *v,
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(FieldError::Empty);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| FieldError::NotANumber(trimmed.to_string()))?
        }
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(FieldError::NonFinite)
    }
}

/// Parse every slot and report per field. Never short-circuits.
#[must_use]
pub fn validate_fields(panel: &DiseasePanel, raw: &RawInputSet) -> ValidationReport {
    let fields = panel
        .fields
        .iter()
        .enumerate()
        .map(|(index, spec)| FieldReport {
            index,
            label: spec.label,
            result: raw.get(index).ok_or(FieldError::Missing).and_then(parse_slot),
        })
        .collect();

    ValidationReport {
        disease: panel.disease,
        fields,
        extra: raw.len().saturating_sub(panel.len()),
    }
}

/// Convert a raw set into a validated vector, failing as a single unit.
///
/// # Errors
/// Returns `ValidationFailure` if any slot is missing, empty, non-numeric or non-finite.
pub fn validate(panel: &DiseasePanel, raw: &RawInputSet) -> Result<ValidatedVector, ValidationFailure> {
    validate_fields(panel, raw).into_vector()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_numeric_input_preserves_order() {
        let panel = Disease::Diabetes.panel();
        let raw = RawInputSet::from_texts(["2", "150", "80", "30", "100", "28.5", "0.5", "45"]);

        let vector = validate(panel, &raw).expect("Should validate");
        assert_eq!(vector.len(), panel.len());
        assert_eq!(
            vector.as_slice(),
            &[2.0, 150.0, 80.0, 30.0, 100.0, 28.5, 0.5, 45.0]
        );
        assert_eq!(vector.disease(), Disease::Diabetes);
    }

    #[test]
    fn test_mixed_widget_and_text_slots() {
        let panel = Disease::Diabetes.panel();
        let mut values = vec![RawValue::Number(2.0), RawValue::from(" 150 ")];
        values.extend(["80", "30", "100", "28.5", "0.5"].map(RawValue::from));
        values.push(RawValue::Number(45.0));

        let vector = validate(panel, &RawInputSet::new(values)).expect("Should validate");
        assert!((vector.as_slice()[1] - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_bad_slot_fails_whole_batch() {
        let panel = Disease::HeartDisease.panel();
        let mut texts: Vec<&str> = panel.sample.to_vec();
        texts[4] = "abc";

        let err = validate(panel, &RawInputSet::from_texts(texts)).unwrap_err();
        assert_eq!(err.invalid, vec![4]);
        assert_eq!(err.to_string(), VALIDATION_MESSAGE);
    }

    #[test]
    fn test_report_identifies_every_bad_field() {
        let panel = Disease::Diabetes.panel();
        let raw = RawInputSet::from_texts(["", "150", "x", "30", "100", "28.5", "0.5", "45"]);

        let report = validate_fields(panel, &raw);
        assert!(!report.is_valid());
        assert_eq!(report.invalid_indices(), vec![0, 2]);
        assert_eq!(report.fields[0].result, Err(FieldError::Empty));
        assert_eq!(
            report.fields[2].result,
            Err(FieldError::NotANumber("x".to_string()))
        );
        assert_eq!(report.fields[1].label, "Glucose Level");
    }

    #[test]
    fn test_zero_is_valid() {
        let panel = Disease::Parkinsons.panel();
        let raw = RawInputSet::from_texts(vec!["0"; 22]);

        let vector = validate(panel, &raw).expect("Zeros should validate");
        assert_eq!(vector.len(), 22);
        assert!(vector.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let panel = Disease::Diabetes.panel();
        let mut texts: Vec<&str> = panel.sample.to_vec();
        texts[0] = "NaN";
        texts[1] = "inf";

        let report = validate_fields(panel, &RawInputSet::from_texts(texts));
        assert_eq!(report.fields[0].result, Err(FieldError::NonFinite));
        assert_eq!(report.fields[1].result, Err(FieldError::NonFinite));

        let mut values: Vec<RawValue> = panel.sample.iter().map(|s| RawValue::from(*s)).collect();
        values[3] = RawValue::Number(f64::NAN);
        assert!(validate(panel, &RawInputSet::new(values)).is_err());
    }

    #[test]
    fn test_length_mismatch_fails() {
        let panel = Disease::Diabetes.panel();

        let short = RawInputSet::from_texts(["1", "2"]);
        let err = validate(panel, &short).unwrap_err();
        assert_eq!(err.invalid, vec![2, 3, 4, 5, 6, 7]);

        let mut texts: Vec<&str> = panel.sample.to_vec();
        texts.push("9");
        let err = validate(panel, &RawInputSet::from_texts(texts)).unwrap_err();
        assert!(err.invalid.is_empty());
        assert_eq!(err.extra, 1);
    }

    #[test]
    fn test_scientific_and_signed_notation() {
        let panel = Disease::Parkinsons.panel();
        let mut texts: Vec<&str> = panel.sample.to_vec();
        texts[4] = "7e-5";
        texts[18] = "-4.813031";

        let vector = validate(panel, &RawInputSet::from_texts(texts)).expect("Should validate");
        assert!((vector.as_slice()[4] - 0.00007).abs() < 1e-12);
        assert!(vector.as_slice()[18] < 0.0);
    }
}
