//! List pane component showing the messages of a file

use jsonl_core::{Message, MessageKind};
use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
};

use super::pane_block;
use crate::search::line_matches;
use crate::{App, Document, Theme};

/// Render the list pane
pub fn render_list_pane(frame: &mut Frame, area: Rect, app: &App, doc: &Document) {
    let block = pane_block(
        format!(" Messages ({}) ", doc.messages.messages.len()),
        false,
        app,
    );
    let inner = block.inner(area);
    let list = &doc.messages.list;

    let items: Vec<ListItem> = list
        .visible_range()
        .filter_map(|i| doc.messages.messages.get(i).map(|m| (i, m)))
        .map(|(i, message)| {
            let is_match = !app.search_query.is_empty()
                && line_matches(&message.plain_text(), &app.search_query);
            format_list_item(
                message,
                i == list.cursor(),
                is_match,
                inner.width as usize,
                &app.theme,
            )
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Three-letter tag for a message kind
fn kind_tag(kind: &MessageKind) -> &'static str {
    match kind {
        MessageKind::User => "USR",
        MessageKind::Assistant => "AST",
        MessageKind::System => "SYS",
        MessageKind::Summary => "SUM",
        MessageKind::Unknown(_) => "???",
    }
}

/// Format a single list item:
/// [match]  [time:8] [type:3] [preview]
fn format_list_item(
    message: &Message,
    is_selected: bool,
    is_match: bool,
    width: usize,
    theme: &Theme,
) -> ListItem<'static> {
    let match_char = if is_match { "•" } else { " " };
    let time = message.format_time();

    let prefix_len = 2 + 8 + 1 + 3 + 1; // "• HH:MM:SS USR "
    let preview_width = width.saturating_sub(prefix_len);
    let preview = message.preview(preview_width);

    let style = if is_selected {
        theme.selected
    } else if message.is_meta {
        theme.meta
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(format!("{} ", match_char), style.patch(theme.search_prompt)),
        Span::styled(format!("{} ", time), style.patch(theme.dimmed)),
        Span::styled(
            format!("{} ", kind_tag(&message.kind)),
            style.patch(theme.kind_color(&message.kind)),
        ),
        Span::styled(format!("{:<preview_width$}", preview), style),
    ];

    ListItem::new(Line::from(spans))
}
