//! String preview pane for the JSON view

use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use super::{pane_block, styled_line};
use crate::markdown::render_text;
use crate::{App, Document};

/// Render the cursor line's string value as formatted text
pub fn render_preview_pane(frame: &mut Frame, area: Rect, app: &App, doc: &Document) {
    let preview = doc.json.preview();
    let title = match preview.as_ref().and_then(|p| p.key.as_deref()) {
        Some(key) => format!(" Preview: {} ", key),
        None => " Preview ".to_string(),
    };
    let block = pane_block(title, false, app);
    let inner = block.inner(area);

    let Some(preview) = preview else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "No string value on current line",
            app.theme.dimmed,
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let width = inner.width as usize;
    let lines: Vec<Line> = render_text(&preview.value, width, &app.theme)
        .iter()
        .take(inner.height as usize)
        .map(|line| styled_line(line, width))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
