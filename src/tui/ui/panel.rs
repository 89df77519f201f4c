//! Disease panel input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::FieldCollector;
use crate::domain::{Disease, FieldKind, PredictionOutcome, VALIDATION_MESSAGE};
use crate::tui::styles::MedicalTheme;
use crate::PredictorError;

const COLUMNS: usize = 3;

/// Where a panel is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Nothing entered since the panel was opened or reset
    #[default]
    Idle,
    /// User is editing fields
    Collecting,
    /// Last submission produced an outcome
    Outcome(PredictionOutcome),
    /// Last submission failed
    Error(String),
}

/// Form state for one disease panel.
#[derive(Debug, Clone)]
pub struct PanelFormState {
    pub collector: FieldCollector,
    pub selected_field: usize,
    pub status: SubmissionState,
    /// Fields flagged by the last failed validation.
    pub invalid_fields: Vec<usize>,
}

impl PanelFormState {
    #[must_use]
    pub fn new(disease: Disease) -> Self {
        Self {
            collector: FieldCollector::new(disease.panel()),
            selected_field: 0,
            status: SubmissionState::Idle,
            invalid_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn disease(&self) -> Disease {
        self.collector.panel().disease
    }

    fn field_count(&self) -> usize {
        self.collector.panel().len()
    }

    fn touch(&mut self) {
        self.status = SubmissionState::Collecting;
        self.invalid_fields.retain(|i| *i != self.selected_field);
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.field_count();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.field_count() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.collector.input_char(self.selected_field, c) {
            self.touch();
        }
    }

    pub fn delete_char(&mut self) {
        self.collector.delete_char(self.selected_field);
        self.touch();
    }

    pub fn clear_field(&mut self) {
        self.collector.clear(self.selected_field);
        self.touch();
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        if matches!(
            self.collector.panel().fields[self.selected_field].kind,
            FieldKind::Choice(_)
        ) {
            self.collector.cycle_choice(self.selected_field, forward);
            self.touch();
        }
    }

    pub fn load_sample_data(&mut self) {
        self.collector.load_sample();
        self.invalid_fields.clear();
        self.status = SubmissionState::Collecting;
    }

    /// Record the result of a submission.
    pub fn apply_result(&mut self, result: Result<PredictionOutcome, PredictorError>) {
        match result {
            Ok(outcome) => {
                self.invalid_fields.clear();
                self.status = SubmissionState::Outcome(outcome);
            }
            Err(PredictorError::Validation(failure)) => {
                self.invalid_fields = failure.invalid;
                self.status = SubmissionState::Error(VALIDATION_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::error!("Prediction failed for {} panel: {}", self.disease(), e);
                self.invalid_fields.clear();
                self.status = SubmissionState::Error(e.to_string());
            }
        }
    }
}

/// Render a disease panel form
pub fn render_panel_form(f: &mut Frame, area: Rect, state: &PanelFormState, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Result
            Constraint::Length(2), // Key hints
        ])
        .split(area);

    render_form_header(f, chunks[0], state);
    render_form_fields(f, chunks[1], state, focused);
    render_result(f, chunks[2], state);
    render_form_footer(f, chunks[3], focused);
}

fn render_form_header(f: &mut Frame, area: Rect, state: &PanelFormState) {
    let panel = state.collector.panel();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(panel.title, MedicalTheme::title()),
        Span::styled(
            format!(" │ {} measurements", panel.len()),
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PanelFormState, focused: bool) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); COLUMNS])
        .margin(1)
        .split(area);

    // Field i goes to column i % 3, mirroring the three-column web layout.
    for (col, column_area) in columns.iter().enumerate() {
        let indices: Vec<usize> = (col..state.field_count()).step_by(COLUMNS).collect();
        render_field_column(f, *column_area, state, &indices, focused);
    }
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    state: &PanelFormState,
    indices: &[usize],
    focused: bool,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = indices
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let fields = state.collector.panel().fields;
    for (slot, &index) in indices.iter().enumerate() {
        let field = &fields[index];
        let is_selected = focused && index == state.selected_field;
        let is_invalid = state.invalid_fields.contains(&index);

        let border_style = if is_invalid {
            MedicalTheme::danger()
        } else if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = state.collector.display(index);
        let value_display = if value.is_empty() {
            Span::styled(field.hint, MedicalTheme::text_muted())
        } else if matches!(field.kind, FieldKind::Choice(_)) {
            Span::styled(format!("◂ {value} ▸"), MedicalTheme::text())
        } else {
            Span::styled(value, MedicalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[slot]);
    }
}

fn render_result(f: &mut Frame, area: Rect, state: &PanelFormState) {
    let panel = state.collector.panel();
    let content = match &state.status {
        SubmissionState::Outcome(outcome) => Line::from(vec![
            Span::styled(format!("{}: ", panel.submit_label), MedicalTheme::text_secondary()),
            Span::styled(outcome.message(), MedicalTheme::outcome(outcome.is_positive())),
        ]),
        SubmissionState::Error(message) => Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(message.clone(), MedicalTheme::danger()),
        ]),
        SubmissionState::Idle | SubmissionState::Collecting => Line::from(Span::styled(
            format!("Press Enter for {}", panel.submit_label),
            MedicalTheme::text_muted(),
        )),
    };

    let result = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(result, area);
}

fn render_form_footer(f: &mut Frame, area: Rect, focused: bool) {
    let content = if focused {
        Line::from(vec![
            Span::styled("[↑↓/Tab] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[←→] ", MedicalTheme::key_hint()),
            Span::styled("Choice ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Submit ", MedicalTheme::key_desc()),
            Span::styled("[Ctrl+S] ", MedicalTheme::key_hint()),
            Span::styled("Sample ", MedicalTheme::key_desc()),
            Span::styled("[Del] ", MedicalTheme::key_hint()),
            Span::styled("Clear ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Menu", MedicalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Select panel ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Open", MedicalTheme::key_desc()),
        ])
    };

    f.render_widget(Paragraph::new(content), area);
}
