//! Main TUI application state machine.
//!
//! Handles:
//! - Sidebar navigation between the disease panels
//! - Key handling for the active panel form
//! - Submitting forms to the prediction service

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::PredictionService;
use crate::domain::Disease;

use super::ui::{
    menu::render_menu,
    panel::{render_panel_form, PanelFormState, SubmissionState},
    render_disclaimer,
};

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Panel,
}

/// Main application state
pub struct App {
    screen: Screen,

    /// Highlighted sidebar entry, also the panel shown on the right
    menu_index: usize,

    should_quit: bool,

    service: PredictionService,

    /// One form per disease, in `Disease::ALL` order. Values survive
    /// switching between panels.
    forms: Vec<PanelFormState>,
}

impl App {
    /// Create the application over a ready prediction service.
    #[must_use]
    pub fn new(service: PredictionService) -> Self {
        Self {
            screen: Screen::Menu,
            menu_index: 0,
            should_quit: false,
            service,
            forms: Disease::ALL.into_iter().map(PanelFormState::new).collect(),
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Disease of the panel currently shown.
    #[must_use]
    pub fn active_disease(&self) -> Disease {
        Disease::ALL[self.menu_index]
    }

    #[must_use]
    pub fn form(&self, disease: Disease) -> Option<&PanelFormState> {
        self.forms.iter().find(|f| f.disease() == disease)
    }

    fn active_form(&mut self) -> &mut PanelFormState {
        &mut self.forms[self.menu_index]
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(32), Constraint::Min(0)])
                    .split(rows[0]);

                render_menu(
                    f,
                    columns[0],
                    self.menu_index,
                    self.screen == Screen::Menu,
                );
                render_panel_form(
                    f,
                    columns[1],
                    &self.forms[self.menu_index],
                    self.screen == Screen::Panel,
                );
                render_disclaimer(f, rows[1]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Panel => self.handle_panel_key(key, modifiers),
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        let count = Disease::ALL.len();
        match key {
            KeyCode::Up => {
                self.menu_index = (self.menu_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.menu_index = (self.menu_index + 1) % count;
            }
            KeyCode::Enter | KeyCode::Right => {
                self.screen = Screen::Panel;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key, KeyCode::Char('s') | KeyCode::Char('S')) {
                self.active_form().load_sample_data();
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.active_form().prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.active_form().next_field();
            }
            KeyCode::Left => {
                self.active_form().cycle_choice(false);
            }
            KeyCode::Right => {
                self.active_form().cycle_choice(true);
            }
            KeyCode::Char(c) => {
                self.active_form().input_char(c);
            }
            KeyCode::Backspace => {
                self.active_form().delete_char();
            }
            KeyCode::Delete => {
                self.active_form().clear_field();
            }
            KeyCode::Enter => {
                self.submit_active_form();
            }
            _ => {}
        }
    }

    fn submit_active_form(&mut self) {
        let disease = self.active_disease();
        let raw = self.forms[self.menu_index].collector.raw_input();
        let result = self.service.submit(disease, &raw);
        self.active_form().apply_result(result);
    }

    /// Latest outcome or error for the active panel, if any.
    #[must_use]
    pub fn status(&self) -> &SubmissionState {
        &self.forms[self.menu_index].status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ModelRegistry;
    use crate::domain::{PredictionOutcome, VALIDATION_MESSAGE};
    use crate::ports::Classifier;
    use std::sync::Arc;

    /// Positive when the second feature is above 120.
    struct SecondFeatureModel(usize);

    impl Classifier for SecondFeatureModel {
        fn n_features(&self) -> usize {
            self.0
        }

        fn predict(&self, samples: &[&[f64]]) -> Vec<i64> {
            samples.iter().map(|x| i64::from(x[1] > 120.0)).collect()
        }
    }

    fn app() -> App {
        let registry = ModelRegistry::from_models(Disease::ALL.map(|d| {
            let model: Arc<dyn Classifier> = Arc::new(SecondFeatureModel(d.panel().len()));
            (d, model)
        }))
        .expect("Should build registry");
        App::new(PredictionService::new(Arc::new(registry)))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = app();
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.active_disease(), Disease::Diabetes);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.active_disease(), Disease::Parkinsons);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.active_disease(), Disease::HeartDisease);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Panel);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn test_typed_diabetes_submission() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);

        for value in ["2", "150", "80", "30", "100", "28.5", "0.5", "45"] {
            type_text(&mut app, value);
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.status(),
            &SubmissionState::Outcome(PredictionOutcome::new(Disease::Diabetes, 1))
        );
    }

    #[test]
    fn test_empty_submission_shows_validation_message() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.status(),
            &SubmissionState::Error(VALIDATION_MESSAGE.to_string())
        );
        let form = app.form(Disease::Diabetes).expect("form");
        assert_eq!(form.invalid_fields.len(), 8);
    }

    #[test]
    fn test_heart_sample_then_edit_clears_result() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        app.handle_key(KeyCode::Char('s'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.status(), SubmissionState::Outcome(_)));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status(), &SubmissionState::Collecting);
    }

    #[test]
    fn test_values_persist_across_panels() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "7");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);

        let form = app.form(Disease::Diabetes).expect("form");
        assert_eq!(form.collector.display(0), "7");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        // Plain 'q' is text input inside a panel.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let mut app = self::app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
