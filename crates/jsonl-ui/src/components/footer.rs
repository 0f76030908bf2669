//! Footer/status bar component

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const FILE_LIST_HELP: &str = "j/k: navigate • enter: open • q: quit • ?: help";
const VIEWER_HELP: &str = "j/k: scroll • /: search • n/N: next/prev • tab: mode • q: back";

/// Render the footer/status bar
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let status = app.status_info();
    let help_hint = if app.document().is_some() {
        VIEWER_HELP
    } else {
        FILE_LIST_HELP
    };

    let message = if let Some(msg) = &app.status_message {
        format!("{} │ {} │ {}", status, msg, help_hint)
    } else {
        format!("{} │ {}", status, help_hint)
    };

    let style = if app.status_message.is_some() {
        app.theme.search_prompt
    } else {
        app.theme.help
    };

    let footer = Paragraph::new(message)
        .style(style)
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}
