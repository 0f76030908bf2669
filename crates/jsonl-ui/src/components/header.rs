//! Header component

use jsonl_core::ViewMode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

/// Render the header
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(app.title(), app.theme.title)];

    match app.document() {
        None => {
            if let Some(project) = &app.project {
                spans.push(Span::styled(" │ ", app.theme.dimmed));
                spans.push(Span::raw(format!("Project: {}", project.display())));
            }
        }
        Some(doc) => {
            let modes = [(ViewMode::Json, "1:JSON"), (ViewMode::Messages, "2:MESSAGES")];
            let modes_display = modes
                .iter()
                .map(|(mode, label)| {
                    if *mode == doc.mode {
                        format!("[{}]", label)
                    } else {
                        label.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            spans.push(Span::styled(" │ ", app.theme.dimmed));
            spans.push(Span::styled(modes_display, app.theme.border_focused));

            if !app.search_query.is_empty() {
                spans.push(Span::styled(" │ ", app.theme.dimmed));
                spans.push(Span::styled(
                    format!("[/{}]", app.search_query),
                    app.theme.search_prompt,
                ));
            }
        }
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}
