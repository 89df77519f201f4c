//! Field collector: assembles one raw value per panel field.
//!
//! No validation happens here. The collector only enforces what a widget
//! would: numeric fields accept numeric characters, choice fields cycle
//! through their options.

use crate::domain::{DiseasePanel, FieldKind, RawInputSet, RawValue};

/// Editable raw values for one panel, positionally aligned to its fields.
#[derive(Debug, Clone)]
pub struct FieldCollector {
    panel: &'static DiseasePanel,
    values: Vec<RawValue>,
}

fn neutral_value(kind: FieldKind) -> RawValue {
    match kind {
        FieldKind::Choice(choices) => choices
            .first()
            .map(|c| RawValue::Number(c.value))
            .unwrap_or_default(),
        FieldKind::Text | FieldKind::Number { .. } => RawValue::default(),
    }
}

fn accepts(kind: FieldKind, c: char) -> bool {
    match kind {
        FieldKind::Text => !c.is_control(),
        FieldKind::Number { min, .. } => {
            c.is_ascii_digit()
                || c == '.'
                || c == 'e'
                || c == 'E'
                || (c == '-' && min.map_or(true, |m| m < 0.0))
        }
        FieldKind::Choice(_) => false,
    }
}

impl FieldCollector {
    /// Start with every field in its neutral state.
    #[must_use]
    pub fn new(panel: &'static DiseasePanel) -> Self {
        Self {
            panel,
            values: panel.fields.iter().map(|f| neutral_value(f.kind)).collect(),
        }
    }

    #[must_use]
    pub fn panel(&self) -> &'static DiseasePanel {
        self.panel
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<&RawValue> {
        self.values.get(index)
    }

    fn kind(&self, index: usize) -> Option<FieldKind> {
        self.panel.fields.get(index).map(|f| f.kind)
    }

    /// Append a typed character. Returns whether it was accepted.
    pub fn input_char(&mut self, index: usize, c: char) -> bool {
        let Some(kind) = self.kind(index) else {
            return false;
        };
        if !accepts(kind, c) {
            return false;
        }
        match self.values.get_mut(index) {
            Some(RawValue::Text(s)) => {
                s.push(c);
                true
            }
            _ => false,
        }
    }

    /// Remove the last typed character.
    pub fn delete_char(&mut self, index: usize) {
        if let Some(RawValue::Text(s)) = self.values.get_mut(index) {
            s.pop();
        }
    }

    /// Reset one field to its neutral state.
    pub fn clear(&mut self, index: usize) {
        if let (Some(kind), Some(slot)) = (self.kind(index), self.values.get_mut(index)) {
            *slot = neutral_value(kind);
        }
    }

    /// Reset every field.
    pub fn clear_all(&mut self) {
        for index in 0..self.values.len() {
            self.clear(index);
        }
    }

    /// Move a choice field to its next (or previous) option.
    pub fn cycle_choice(&mut self, index: usize, forward: bool) {
        let Some(FieldKind::Choice(choices)) = self.kind(index) else {
            return;
        };
        if choices.is_empty() {
            return;
        }
        let current = match self.values.get(index) {
            Some(RawValue::Number(v)) => choices.iter().position(|c| c.value == *v).unwrap_or(0),
            _ => 0,
        };
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        if let Some(slot) = self.values.get_mut(index) {
            *slot = RawValue::Number(choices[next].value);
        }
    }

    /// Overwrite a field from text, as if typed or picked.
    ///
    /// Choice fields select the option whose value matches `text`; unknown
    /// values leave the field unchanged.
    pub fn set_text(&mut self, index: usize, text: &str) {
        let Some(kind) = self.kind(index) else {
            return;
        };
        let Some(slot) = self.values.get_mut(index) else {
            return;
        };
        match kind {
            FieldKind::Choice(choices) => {
                let parsed = text.trim().parse::<f64>().ok();
                if let Some(choice) = choices.iter().find(|c| Some(c.value) == parsed) {
                    *slot = RawValue::Number(choice.value);
                }
            }
            FieldKind::Text | FieldKind::Number { .. } => *slot = RawValue::Text(text.to_string()),
        }
    }

    /// Fill every field with the panel's sample values.
    pub fn load_sample(&mut self) {
        let panel = self.panel;
        for (index, text) in panel.sample.iter().enumerate() {
            self.set_text(index, text);
        }
    }

    /// Text to show for a field (choice label for choice fields).
    #[must_use]
    pub fn display(&self, index: usize) -> String {
        match (self.kind(index), self.values.get(index)) {
            (Some(FieldKind::Choice(choices)), Some(RawValue::Number(v))) => choices
                .iter()
                .find(|c| c.value == *v)
                .map(|c| c.label.to_string())
                .unwrap_or_else(|| v.to_string()),
            (_, Some(RawValue::Text(s))) => s.clone(),
            (_, Some(RawValue::Number(v))) => v.to_string(),
            (_, None) => String::new(),
        }
    }

    /// Snapshot of the current values for submission.
    #[must_use]
    pub fn raw_input(&self) -> RawInputSet {
        RawInputSet::new(self.values.clone())
    }
}
