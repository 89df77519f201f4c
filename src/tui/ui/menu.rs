//! Sidebar menu listing the disease panels.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::domain::Disease;
use crate::tui::styles::MedicalTheme;

/// Render the panel menu. `focused` is true while the menu has input focus.
pub fn render_menu(f: &mut Frame, area: Rect, selected: usize, focused: bool) {
    let items: Vec<ListItem> = Disease::ALL
        .iter()
        .map(|d| ListItem::new(Line::from(Span::raw(format!(" {} ", d.panel().menu_label)))))
        .collect();

    let border_style = if focused {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(
                    " Prediction of Disease Outbreaks ",
                    MedicalTheme::subtitle(),
                ))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .style(MedicalTheme::text_secondary())
        .highlight_style(MedicalTheme::selected())
        .highlight_symbol("▌");

    let mut state = ListState::default();
    state.select(Some(selected));

    f.render_stateful_widget(list, area, &mut state);
}
