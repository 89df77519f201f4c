//! Disease panels: the static field layout behind each prediction form.
//!
//! Field order is significant. It matches the feature order the
//! corresponding classifier was trained on.

use serde::{Deserialize, Serialize};

/// Diseases with a prediction panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Disease {
    /// All diseases, in menu order.
    pub const ALL: [Disease; 3] = [Disease::Diabetes, Disease::HeartDisease, Disease::Parkinsons];

    /// Short machine key (used for artifact file names and env vars).
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart",
            Self::Parkinsons => "parkinsons",
        }
    }

    /// Name used inside outcome sentences.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart disease",
            Self::Parkinsons => "Parkinson’s disease",
        }
    }

    /// The static panel for this disease.
    #[must_use]
    pub fn panel(&self) -> &'static DiseasePanel {
        match self {
            Self::Diabetes => &DIABETES_PANEL,
            Self::HeartDisease => &HEART_PANEL,
            Self::Parkinsons => &PARKINSONS_PANEL,
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One option of an enumerated field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub label: &'static str,
    pub value: f64,
}

/// How a field collects its raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text; anything the user types is kept.
    Text,
    /// Numeric widget. `min` only restricts what can be typed.
    Number { min: Option<f64>, step: f64 },
    /// Enumerated value for boolean/categorical fields.
    Choice(&'static [Choice]),
}

/// A named measurement field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn text(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Text,
        }
    }

    const fn count(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Number {
                min: Some(0.0),
                step: 1.0,
            },
        }
    }

    const fn measure(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Number {
                min: Some(0.0),
                step: 0.1,
            },
        }
    }

    const fn choice(label: &'static str, hint: &'static str, choices: &'static [Choice]) -> Self {
        Self {
            label,
            hint,
            kind: FieldKind::Choice(choices),
        }
    }
}

/// Static descriptor of a disease form.
#[derive(Debug)]
pub struct DiseasePanel {
    pub disease: Disease,
    pub title: &'static str,
    pub menu_label: &'static str,
    pub submit_label: &'static str,
    pub fields: &'static [FieldSpec],
    /// Example values, one per field, for quick manual testing.
    pub sample: &'static [&'static str],
}

impl DiseasePanel {
    /// Number of fields (and therefore features) in this panel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.label)
    }
}

const YES_NO: &[Choice] = &[
    Choice {
        label: "No (0)",
        value: 0.0,
    },
    Choice {
        label: "Yes (1)",
        value: 1.0,
    },
];

const SEX: &[Choice] = &[
    Choice {
        label: "Female (0)",
        value: 0.0,
    },
    Choice {
        label: "Male (1)",
        value: 1.0,
    },
];

pub static DIABETES_PANEL: DiseasePanel = DiseasePanel {
    disease: Disease::Diabetes,
    title: "Diabetes Prediction",
    menu_label: "Diabetes Prediction",
    submit_label: "Diabetes Test Result",
    fields: &[
        FieldSpec::count("Pregnancies", "count"),
        FieldSpec::measure("Glucose Level", "mg/dL"),
        FieldSpec::measure("Blood Pressure", "mm Hg"),
        FieldSpec::measure("Skin Thickness", "mm"),
        FieldSpec::measure("Insulin", "mu U/ml"),
        FieldSpec::measure("BMI", "kg/m2"),
        FieldSpec::measure("Diabetes Pedigree Function", "score"),
        FieldSpec::count("Age", "years"),
    ],
    sample: &["2", "150", "80", "30", "100", "28.5", "0.5", "45"],
};

pub static HEART_PANEL: DiseasePanel = DiseasePanel {
    disease: Disease::HeartDisease,
    title: "Heart Disease Prediction",
    menu_label: "Heart Disease Prediction",
    submit_label: "Heart Disease Test Result",
    fields: &[
        FieldSpec::count("Age", "years"),
        FieldSpec::choice("Gender (1 = Male, 0 = Female)", "Left/Right", SEX),
        FieldSpec::text("Chest Pain Type", "0-3"),
        FieldSpec::text("Resting Blood Pressure", "mm Hg"),
        FieldSpec::text("Cholesterol Level", "mg/dL"),
        FieldSpec::choice("Fasting Blood Sugar", "> 120 mg/dL", YES_NO),
        FieldSpec::text("Resting ECG", "0-2"),
        FieldSpec::text("Max Heart Rate", "bpm"),
        FieldSpec::choice("Exercise Induced Angina", "Left/Right", YES_NO),
        FieldSpec::text("ST Depression", "oldpeak"),
        FieldSpec::text("Slope", "0-2"),
        FieldSpec::text("CA", "vessels 0-3"),
        FieldSpec::text("Thal", "0-3"),
    ],
    sample: &[
        "63", "1", "3", "145", "233", "1", "0", "150", "0", "2.3", "0", "0", "1",
    ],
};

pub static PARKINSONS_PANEL: DiseasePanel = DiseasePanel {
    disease: Disease::Parkinsons,
    title: "Parkinson’s Prediction",
    menu_label: "Parkinsons Prediction",
    submit_label: "Parkinson’s Test Result",
    fields: &[
        FieldSpec::text("MDVP:Fo(Hz)", "Hz"),
        FieldSpec::text("MDVP:Fhi(Hz)", "Hz"),
        FieldSpec::text("MDVP:Flo(Hz)", "Hz"),
        FieldSpec::text("MDVP:Jitter(%)", "%"),
        FieldSpec::text("MDVP:Jitter(Abs)", "abs"),
        FieldSpec::text("MDVP:RAP", ""),
        FieldSpec::text("MDVP:PPQ", ""),
        FieldSpec::text("Jitter:DDP", ""),
        FieldSpec::text("MDVP:Shimmer", ""),
        FieldSpec::text("MDVP:Shimmer(dB)", "dB"),
        FieldSpec::text("Shimmer:APQ3", ""),
        FieldSpec::text("Shimmer:APQ5", ""),
        FieldSpec::text("MDVP:APQ", ""),
        FieldSpec::text("Shimmer:DDA", ""),
        FieldSpec::text("NHR", ""),
        FieldSpec::text("HNR", ""),
        FieldSpec::text("RPDE", ""),
        FieldSpec::text("DFA", ""),
        FieldSpec::text("Spread1", ""),
        FieldSpec::text("Spread2", ""),
        FieldSpec::text("D2", ""),
        FieldSpec::text("PPE", ""),
    ],
    sample: &[
        "119.992", "157.302", "74.997", "0.00784", "0.00007", "0.0037", "0.00554", "0.01109",
        "0.04374", "0.426", "0.02182", "0.0313", "0.02971", "0.06545", "0.02211", "21.033",
        "0.414783", "0.815285", "-4.813031", "0.266482", "2.301442", "0.284654",
    ],
};
