//! File list component

use ratatui::{prelude::*, widgets::Paragraph};

use super::pane_block;
use crate::App;

/// Render the list of candidate files
pub fn render_file_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = pane_block(" Files ".to_string(), true, app);
    let inner = block.inner(area);
    let width = inner.width as usize;

    let mut lines: Vec<Line> = Vec::new();

    if let Some(err) = &app.error_message {
        lines.push(Line::from(Span::styled(format!("Error: {}", err), app.theme.error)));
    }

    if app.files.is_empty() {
        let empty = if app.project.is_some() {
            "No Claude history found for this project."
        } else {
            "No .jsonl files found in current directory."
        };
        lines.push(Line::from(Span::styled(empty, app.theme.dimmed)));
    } else {
        for i in app.file_list.visible_range() {
            if lines.len() >= inner.height as usize {
                break;
            }
            let Some(file) = app.files.get(i) else {
                break;
            };
            let selected = i == app.file_list.cursor();
            let marker = if selected { "> " } else { "  " };
            let text = format!("{}{} ({})", marker, file.display_name, file.format_modified());
            let padded = format!("{:<width$}", text, width = width);
            let style = if selected {
                app.theme.selected
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(padded, style)));
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
