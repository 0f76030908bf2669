//! Content pane component for displaying the selected message

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use super::{pane_block, styled_line};
use crate::search::highlight_matches;
use crate::{App, Document};

/// Render the content pane
pub fn render_content_pane(frame: &mut Frame, area: Rect, app: &App, doc: &Document) {
    let block = pane_block(" Message ".to_string(), true, app);
    let inner = block.inner(area);
    let width = app.message_body_width();

    let rendered = app.message_lines(doc);
    let body = &doc.messages.body;

    let content: Vec<Line> = if rendered.is_empty() {
        vec![Line::from(Span::styled("No messages", app.theme.dimmed))]
    } else {
        rendered
            .iter()
            .skip(body.offset())
            .take(inner.height as usize)
            .map(|line| styled_line(&highlight_matches(line, &app.search_query, &app.theme), width))
            .collect()
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
    render_scrollbar(frame, area, rendered.len(), body.offset(), inner.height);
}

/// Render a scrollbar along the right border if content is taller than
/// the viewport
pub fn render_scrollbar(frame: &mut Frame, area: Rect, total: usize, position: usize, height: u16) {
    if total <= height as usize {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));

    let mut scrollbar_state = ScrollbarState::new(total)
        .position(position)
        .viewport_content_length(height as usize);

    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
