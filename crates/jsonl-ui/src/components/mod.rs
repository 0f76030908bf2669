//! UI components for the JSONL viewer

pub mod content_pane;
pub mod file_list;
pub mod footer;
pub mod header;
pub mod json_pane;
pub mod list_pane;
pub mod overlays;
pub mod preview_pane;
pub mod search;

pub use content_pane::*;
pub use file_list::*;
pub use footer::*;
pub use header::*;
pub use json_pane::*;
pub use list_pane::*;
pub use overlays::*;
pub use preview_pane::*;
pub use search::*;

use ansi_to_tui::IntoText;
use jsonl_core::ViewMode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use crate::ansi::{pad, strip, truncate};
use crate::{App, Screen};

pub const HEADER_HEIGHT: u16 = 2;
pub const FOOTER_HEIGHT: u16 = 2;

/// Top-level split of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn frame_areas(area: Rect) -> FrameAreas {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);
    FrameAreas {
        header,
        body,
        footer,
    }
}

/// JSON pane, plus the preview pane to its right when shown
pub fn json_areas(body: Rect, preview: bool) -> (Rect, Option<Rect>) {
    if !preview {
        return (body, None);
    }
    let [json, preview] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(body);
    (json, Some(preview))
}

/// Message list on the left, rendered message on the right
pub fn message_areas(body: Rect) -> (Rect, Rect) {
    let [list, content] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(body);
    (list, content)
}

/// Area left inside a bordered block
pub fn bordered_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// `percent`% of `len`, computed wide so large terminals cannot overflow
pub fn percent_of(len: u16, percent: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(len)
}

/// Bordered block, highlighted when focused
pub fn pane_block(title: String, focused: bool, app: &App) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            app.theme.border_focused
        } else {
            app.theme.border
        })
}

/// Convert one styled line to a ratatui line, fitted to `width` columns
pub fn styled_line(s: &str, width: usize) -> Line<'static> {
    let fitted = pad(&truncate(s, width), width);
    match fitted.as_bytes().into_text() {
        Ok(text) => text.lines.into_iter().next().unwrap_or_default(),
        Err(_) => Line::raw(strip(&fitted)),
    }
}

/// Draw the whole frame
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = frame_areas(frame.area());

    render_header(frame, areas.header, app);

    match app.screen.document() {
        None => render_file_list(frame, areas.body, app),
        Some(doc) => match doc.mode {
            ViewMode::Json => {
                let (json_area, preview_area) = json_areas(areas.body, doc.json.show_preview);
                render_json_pane(frame, json_area, app, doc);
                if let Some(area) = preview_area {
                    render_preview_pane(frame, area, app, doc);
                }
            }
            ViewMode::Messages => {
                let (list_area, content_area) = message_areas(areas.body);
                render_list_pane(frame, list_area, app, doc);
                render_content_pane(frame, content_area, app, doc);
            }
        },
    }

    render_footer(frame, areas.footer, app);

    if let Screen::Search { buffer, .. } = &app.screen {
        render_search_input(frame, buffer, app);
    }
    if app.show_help {
        render_help_overlay(frame, app);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{AppAction, Document, Theme};
    use jsonl_core::{ContentBlock, FileEntry, Message, MessageKind};
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    fn render(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn viewer(mode: ViewMode) -> App {
        let messages = vec![
            Message::new(
                MessageKind::Assistant,
                vec![ContentBlock::Text {
                    text: "hello from the assistant".to_string(),
                }],
            ),
            Message::new(MessageKind::Unknown("customtool".to_string()), Vec::new()),
        ];
        let doc = Document::from_parts(
            "session.jsonl",
            PathBuf::from("session.jsonl"),
            "{\n    \"message\": \"Hello world\",\n    \"count\": 3\n}",
            messages,
            mode,
            &Theme::default(),
        );
        let mut app = App::new(Vec::new(), None, mode);
        app.screen = Screen::Viewer(doc);
        app.resize(100, 20);
        app
    }

    #[test]
    fn test_styled_line_fits_width() {
        let line = styled_line("\x1b[31mred text that is long\x1b[0m", 8);
        assert_eq!(line.width(), 8);
        assert_eq!(line.spans[0].content, "red text");
        assert_eq!(styled_line("ab", 4).width(), 4);
    }

    #[test]
    fn test_file_list_frame() {
        let files = vec![FileEntry {
            path: PathBuf::from("a.jsonl"),
            display_name: "a.jsonl".to_string(),
            modified: chrono::Local::now(),
        }];
        let mut app = App::new(files, Some(PathBuf::from("/home/user/code")), ViewMode::Json);
        app.resize(80, 12);
        let screen = render(&app, 80, 12);
        assert!(screen.contains("Claude JSONL Viewer"));
        assert!(screen.contains("/home/user/code"));
        assert!(screen.contains("a.jsonl"));
    }

    #[test]
    fn test_open_error_keeps_selected_row_drawn() {
        let dir = tempfile::tempdir().unwrap();
        let files = (0..30)
            .map(|i| {
                let name = format!("f{i:02}.jsonl");
                FileEntry {
                    path: dir.path().join(&name),
                    display_name: name,
                    modified: chrono::Local::now(),
                }
            })
            .collect();
        let mut app = App::new(files, None, ViewMode::Json);
        app.resize(80, 12);
        app.handle_action(AppAction::Bottom);
        app.handle_action(AppAction::Open);

        assert!(app.error_message.is_some());
        let screen = render(&app, 80, 12);
        assert!(screen.contains("Error:"), "{screen}");
        assert!(screen.contains("> f29.jsonl"), "{screen}");
    }

    #[test]
    fn test_overlays_on_very_wide_terminal() {
        assert_eq!(percent_of(2000, 60), 1200);
        assert_eq!(percent_of(u16::MAX, 100), u16::MAX);

        let mut app = viewer(ViewMode::Json);
        app.resize(2000, 30);
        app.show_help = true;
        let screen = render(&app, 2000, 30);
        assert!(screen.contains("Key Bindings"));

        app.show_help = false;
        app.handle_action(AppAction::StartSearch);
        app.handle_action(AppAction::SearchInput('h'));
        assert!(render(&app, 2000, 30).contains("/h"));
    }

    #[test]
    fn test_empty_file_list_frame() {
        let app = App::new(Vec::new(), None, ViewMode::Json);
        let screen = render(&app, 80, 12);
        assert!(screen.contains("No .jsonl files found in current directory."));
    }

    #[test]
    fn test_json_frame_with_preview() {
        let mut app = viewer(ViewMode::Json);
        app.handle_action(AppAction::Down);
        app.handle_action(AppAction::TogglePreview);
        let screen = render(&app, 100, 20);
        assert!(screen.contains("\"message\": \"Hello world\""));
        assert!(screen.contains("Preview: message"));
        assert!(screen.contains("Line 2/4"));
    }

    #[test]
    fn test_preview_placeholder() {
        let mut app = viewer(ViewMode::Json);
        app.handle_action(AppAction::TogglePreview);
        let screen = render(&app, 100, 20);
        assert!(screen.contains("No string value on current line"));
    }

    #[test]
    fn test_messages_frame() {
        let mut app = viewer(ViewMode::Messages);
        let screen = render(&app, 100, 20);
        assert!(screen.contains("assistant"));
        assert!(screen.contains("hello from the assistant"));

        app.handle_action(AppAction::Down);
        let screen = render(&app, 100, 20);
        assert!(screen.contains("customtool"));
        assert!(screen.contains("⚠"));
    }

    #[test]
    fn test_search_input_and_help_frames() {
        let mut app = viewer(ViewMode::Json);
        app.handle_action(AppAction::StartSearch);
        app.handle_action(AppAction::SearchInput('h'));
        assert!(render(&app, 100, 20).contains("/h"));

        app.handle_action(AppAction::SubmitSearch);
        assert!(render(&app, 100, 20).contains("[/h]"));

        app.handle_action(AppAction::ToggleHelp);
        assert!(render(&app, 100, 40).contains("Key Bindings"));
    }
}
