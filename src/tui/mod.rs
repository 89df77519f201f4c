//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the form renderer for the prediction workflow:
//! - Sidebar menu to pick a disease panel
//! - Panel form with fields laid out in three columns
//! - Inline outcome or validation message after submit

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
pub use ui::panel::{PanelFormState, SubmissionState};
