//! Highlighted JSON pane with a cursor gutter

use ratatui::{prelude::*, widgets::Paragraph};

use super::{pane_block, render_scrollbar, styled_line};
use crate::ansi::paint;
use crate::search::highlight_matches;
use crate::{App, Document};

/// Render the JSON view of a document
pub fn render_json_pane(frame: &mut Frame, area: Rect, app: &App, doc: &Document) {
    let block = pane_block(" JSON ".to_string(), true, app);
    let inner = block.inner(area);
    let width = inner.width as usize;
    let view = &doc.json;
    let digits = view.lines.len().max(1).to_string().len();

    let lines: Vec<Line> = view
        .viewport
        .visible_range()
        .map(|idx| {
            let gutter = if idx == view.viewport.cursor() {
                paint(app.theme.cursor_gutter, &format!("▶{:>digits$} ", idx + 1))
            } else {
                paint(app.theme.gutter, &format!(" {:>digits$} ", idx + 1))
            };
            let body = view.highlighted.get(idx).map(String::as_str).unwrap_or_default();
            let body = highlight_matches(body, &app.search_query, &app.theme);
            styled_line(&format!("{gutter}{body}"), width)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
    render_scrollbar(frame, area, view.viewport.len(), view.viewport.offset(), inner.height);
}
