//! Help overlay

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::percent_of;
use crate::{event::HELP_TEXT, App};

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 80, frame.area());

    // Clear background
    frame.render_widget(Clear, area);

    let help = Paragraph::new(HELP_TEXT)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" ? to close ")
                .borders(Borders::ALL)
                .border_style(app.theme.border_focused),
        );

    frame.render_widget(help, area);
}

/// Helper to create a centered rect with percentage width and height
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let width = percent_of(r.width, percent_x);
    let height = percent_of(r.height, percent_y);
    let x = (r.width - width) / 2;
    let y = (r.height - height) / 2;

    Rect::new(r.x + x, r.y + y, width, height)
}
