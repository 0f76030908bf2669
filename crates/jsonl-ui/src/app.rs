//! Application state and logic

use std::path::{Path, PathBuf};

use jsonl_core::{
    extract_string, parse_messages_file, pretty_print_file, FileEntry, LoadError, Message,
    StringPreview, ViewMode,
};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::ansi::strip;
use crate::components::{bordered_inner, frame_areas, json_areas, message_areas};
use crate::event::{AppAction, InputMode};
use crate::highlight::highlight_json_line;
use crate::message::render_message;
use crate::search::{find_match, line_matches, Direction};
use crate::theme::Theme;
use crate::viewport::{Motion, NavKey, PendingKeys, Viewport};

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Pretty-printed JSON of an open file
#[derive(Debug, Clone)]
pub struct JsonView {
    /// Raw pretty-printed lines, searched as-is
    pub lines: Vec<String>,
    /// Highlighted copy of `lines`, rebuilt on load and reload
    pub highlighted: Vec<String>,
    pub viewport: Viewport,
    pub show_preview: bool,
}

impl JsonView {
    fn new(pretty: &str, theme: &Theme) -> Self {
        let lines: Vec<String> = if pretty.is_empty() {
            Vec::new()
        } else {
            pretty.split('\n').map(str::to_string).collect()
        };
        let highlighted = lines
            .iter()
            .map(|line| highlight_json_line(line, theme))
            .collect();
        debug!(lines = lines.len(), "highlighted JSON lines");
        Self {
            viewport: Viewport::new(lines.len(), 1),
            lines,
            highlighted,
            show_preview: false,
        }
    }

    pub fn current_line(&self) -> Option<&str> {
        self.lines.get(self.viewport.cursor()).map(String::as_str)
    }

    /// String value on the cursor line, for the preview pane
    pub fn preview(&self) -> Option<StringPreview> {
        self.current_line().and_then(extract_string)
    }
}

/// Typed messages of an open file
#[derive(Debug, Clone)]
pub struct MessageView {
    pub messages: Vec<Message>,
    /// Selected message
    pub list: Viewport,
    /// Scroll position within the rendered message
    pub body: Viewport,
}

impl MessageView {
    fn new(messages: Vec<Message>) -> Self {
        Self {
            list: Viewport::new(messages.len(), 1),
            body: Viewport::default(),
            messages,
        }
    }

    pub fn current(&self) -> Option<&Message> {
        self.messages.get(self.list.cursor())
    }
}

/// An open file with both of its views
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub path: PathBuf,
    pub mode: ViewMode,
    pub json: JsonView,
    pub messages: MessageView,
}

impl Document {
    /// Read and decode a file
    pub fn load(path: &Path, name: &str, mode: ViewMode, theme: &Theme) -> Result<Self, LoadError> {
        let pretty = pretty_print_file(path)?;
        let messages = parse_messages_file(path)?;
        info!(
            file = %path.display(),
            lines = pretty.lines().count(),
            messages = messages.len(),
            "opened file"
        );
        Ok(Self::from_parts(name, path.to_path_buf(), &pretty, messages, mode, theme))
    }

    pub fn from_parts(
        name: impl Into<String>,
        path: PathBuf,
        pretty: &str,
        messages: Vec<Message>,
        mode: ViewMode,
        theme: &Theme,
    ) -> Self {
        Self {
            name: name.into(),
            path,
            mode,
            json: JsonView::new(pretty, theme),
            messages: MessageView::new(messages),
        }
    }
}

/// The active screen. Viewer and search input both own the open document,
/// so neither can exist without one.
#[derive(Debug, Clone)]
pub enum Screen {
    FileList,
    Viewer(Document),
    /// Typing a query over an open document
    Search { document: Document, buffer: String },
}

impl Screen {
    pub fn document(&self) -> Option<&Document> {
        match self {
            Screen::FileList => None,
            Screen::Viewer(doc) | Screen::Search { document: doc, .. } => Some(doc),
        }
    }

    fn document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Screen::FileList => None,
            Screen::Viewer(doc) | Screen::Search { document: doc, .. } => Some(doc),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        match self {
            Screen::Search { .. } => InputMode::Search,
            _ => InputMode::Normal,
        }
    }
}

/// Application state
pub struct App {
    pub screen: Screen,
    /// Files offered on the file list
    pub files: Vec<FileEntry>,
    /// Project the history directory belongs to
    pub project: Option<PathBuf>,
    pub file_list: Viewport,
    pub keys: PendingKeys,
    /// Committed search query, shared by both view modes
    pub search_query: String,
    /// Mode a newly opened file starts in
    pub initial_mode: ViewMode,
    pub show_help: bool,
    /// Error to display on the file list
    pub error_message: Option<String>,
    /// Status message
    pub status_message: Option<String>,
    pub theme: Theme,
    area: Rect,
}

fn nav_key(action: &AppAction) -> NavKey {
    match action {
        AppAction::Digit(d) => NavKey::Digit(*d),
        AppAction::Down => NavKey::Motion(Motion::Down),
        AppAction::Up => NavKey::Motion(Motion::Up),
        AppAction::HalfPageDown => NavKey::Motion(Motion::HalfPageDown),
        AppAction::HalfPageUp => NavKey::Motion(Motion::HalfPageUp),
        AppAction::Top => NavKey::Motion(Motion::Top),
        AppAction::Bottom => NavKey::Motion(Motion::Bottom),
        AppAction::PressG => NavKey::Chord('g'),
        _ => NavKey::Other,
    }
}

impl App {
    pub fn new(files: Vec<FileEntry>, project: Option<PathBuf>, initial_mode: ViewMode) -> Self {
        let mut app = Self {
            screen: Screen::FileList,
            file_list: Viewport::new(files.len(), 1),
            files,
            project,
            keys: PendingKeys::default(),
            search_query: String::new(),
            initial_mode,
            show_help: false,
            error_message: None,
            status_message: None,
            theme: Theme::default(),
            area: Rect::new(0, 0, 80, 24),
        };
        app.resize(80, 24);
        app
    }

    pub fn input_mode(&self) -> InputMode {
        self.screen.input_mode()
    }

    pub fn document(&self) -> Option<&Document> {
        self.screen.document()
    }

    /// Recompute every viewport height for a terminal of the given size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        self.fit_file_list();

        let mut screen = std::mem::replace(&mut self.screen, Screen::FileList);
        if let Some(doc) = screen.document_mut() {
            self.layout_document(doc);
        }
        self.screen = screen;
    }

    /// Apply one action
    pub fn handle_action(&mut self, action: AppAction) -> Flow {
        match action {
            AppAction::Quit => return Flow::Quit,
            AppAction::Resize(width, height) => {
                self.resize(width, height);
                return Flow::Continue;
            }
            AppAction::Redraw | AppAction::None => return Flow::Continue,
            _ => {}
        }

        if self.show_help {
            if matches!(
                action,
                AppAction::ToggleHelp | AppAction::Escape | AppAction::Back
            ) {
                self.show_help = false;
            }
            return Flow::Continue;
        }
        if action == AppAction::ToggleHelp {
            self.show_help = true;
            return Flow::Continue;
        }

        let screen = std::mem::replace(&mut self.screen, Screen::FileList);
        let (next, flow) = match screen {
            Screen::FileList => self.on_file_list(action),
            Screen::Viewer(doc) => self.on_viewer(doc, action),
            Screen::Search { document, buffer } => self.on_search(document, buffer, action),
        };
        self.screen = next;
        flow
    }

    /// Open the file under the file list cursor
    pub fn open_selected(&mut self) {
        self.screen = self.load_selected();
    }

    /// Size the file list to its pane, less the row the error banner takes
    fn fit_file_list(&mut self) {
        let inner = bordered_inner(frame_areas(self.area).body).height as usize;
        let banner = usize::from(self.error_message.is_some());
        self.file_list.set_height(inner.saturating_sub(banner));
    }

    fn load_selected(&mut self) -> Screen {
        let Some(entry) = self.files.get(self.file_list.cursor()) else {
            return Screen::FileList;
        };
        match Document::load(&entry.path, &entry.display_name, self.initial_mode, &self.theme) {
            Ok(mut doc) => {
                self.error_message = None;
                self.fit_file_list();
                self.status_message = None;
                self.search_query.clear();
                self.layout_document(&mut doc);
                Screen::Viewer(doc)
            }
            Err(e) => {
                warn!(error = %e, "failed to open file");
                self.error_message = Some(e.to_string());
                self.fit_file_list();
                Screen::FileList
            }
        }
    }

    fn on_file_list(&mut self, action: AppAction) -> (Screen, Flow) {
        let key = nav_key(&action);
        let is_nav = key != NavKey::Other;
        if let Some((motion, count)) = self.keys.resolve(key) {
            self.file_list.apply(motion, count);
        }
        if is_nav {
            return (Screen::FileList, Flow::Continue);
        }

        match action {
            AppAction::Back | AppAction::Escape => (Screen::FileList, Flow::Quit),
            AppAction::Open => (self.load_selected(), Flow::Continue),
            _ => (Screen::FileList, Flow::Continue),
        }
    }

    fn on_viewer(&mut self, mut doc: Document, action: AppAction) -> (Screen, Flow) {
        let key = nav_key(&action);
        let is_nav = key != NavKey::Other;
        if let Some((motion, count)) = self.keys.resolve(key) {
            self.apply_motion(&mut doc, motion, count);
        }
        if is_nav {
            return (Screen::Viewer(doc), Flow::Continue);
        }

        self.status_message = None;
        match action {
            AppAction::Back => return (self.close(), Flow::Continue),
            AppAction::Escape => {
                if self.search_query.is_empty() {
                    return (self.close(), Flow::Continue);
                }
                self.search_query.clear();
            }
            AppAction::ToggleMode => {
                doc.mode = doc.mode.toggle();
                self.layout_document(&mut doc);
            }
            AppAction::TogglePreview if doc.mode == ViewMode::Json => {
                doc.json.show_preview = !doc.json.show_preview;
                self.layout_document(&mut doc);
            }
            AppAction::Reload => self.reload(&mut doc),
            AppAction::StartSearch => {
                return (
                    Screen::Search {
                        document: doc,
                        buffer: String::new(),
                    },
                    Flow::Continue,
                )
            }
            AppAction::NextMatch => self.search(&mut doc, Direction::Forward),
            AppAction::PrevMatch => self.search(&mut doc, Direction::Backward),
            _ => {}
        }
        (Screen::Viewer(doc), Flow::Continue)
    }

    fn on_search(&mut self, document: Document, mut buffer: String, action: AppAction) -> (Screen, Flow) {
        match action {
            AppAction::SearchInput(c) => buffer.push(c),
            AppAction::SearchBackspace => {
                buffer.pop();
            }
            AppAction::SubmitSearch => {
                self.search_query = buffer;
                let mut doc = document;
                self.search(&mut doc, Direction::Forward);
                return (Screen::Viewer(doc), Flow::Continue);
            }
            AppAction::CancelSearch => {
                self.search_query.clear();
                return (Screen::Viewer(document), Flow::Continue);
            }
            _ => {}
        }
        (Screen::Search { document, buffer }, Flow::Continue)
    }

    fn close(&mut self) -> Screen {
        self.search_query.clear();
        self.status_message = None;
        Screen::FileList
    }

    fn apply_motion(&mut self, doc: &mut Document, motion: Motion, count: Option<usize>) {
        match doc.mode {
            ViewMode::Json => doc.json.viewport.apply(motion, count),
            ViewMode::Messages => match motion {
                Motion::HalfPageDown | Motion::HalfPageUp => {
                    let step = (doc.messages.body.half_page() * count.unwrap_or(1)) as isize;
                    let delta = if motion == Motion::HalfPageDown { step } else { -step };
                    doc.messages.body.scroll_by(delta);
                }
                _ => {
                    let before = doc.messages.list.cursor();
                    doc.messages.list.apply(motion, count);
                    if doc.messages.list.cursor() != before {
                        self.reset_body(doc);
                    }
                }
            },
        }
    }

    fn search(&mut self, doc: &mut Document, direction: Direction) {
        if self.search_query.is_empty() {
            return;
        }
        let query = self.search_query.clone();

        let found = match doc.mode {
            ViewMode::Json => {
                let hit = find_match(&doc.json.lines, doc.json.viewport.cursor(), direction, &query);
                if let Some(line) = hit {
                    doc.json.viewport.goto(line);
                }
                hit.is_some()
            }
            ViewMode::Messages => {
                let texts: Vec<String> = doc.messages.messages.iter().map(Message::plain_text).collect();
                let hit = find_match(&texts, doc.messages.list.cursor(), direction, &query);
                if let Some(index) = hit {
                    doc.messages.list.goto(index);
                    self.reset_body(doc);
                    let first = self
                        .message_lines(doc)
                        .iter()
                        .position(|line| line_matches(&strip(line), &query));
                    if let Some(line) = first {
                        doc.messages.body.scroll_by(line as isize);
                    }
                }
                hit.is_some()
            }
        };

        if !found {
            debug!(query = %query, "no match");
            self.status_message = Some(format!("Pattern not found: {}", query));
        }
    }

    fn reload(&mut self, doc: &mut Document) {
        match Document::load(&doc.path, &doc.name, doc.mode, &self.theme) {
            Ok(fresh) => {
                doc.json.lines = fresh.json.lines;
                doc.json.highlighted = fresh.json.highlighted;
                doc.json.viewport.set_len(doc.json.lines.len());
                doc.messages.messages = fresh.messages.messages;
                doc.messages.list.set_len(doc.messages.messages.len());
                self.layout_document(doc);
                self.status_message = Some("Reloaded".to_string());
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Fit a document's viewports to the current terminal size
    fn layout_document(&self, doc: &mut Document) {
        let body = frame_areas(self.area).body;
        let (json_area, _) = json_areas(body, doc.json.show_preview);
        doc.json.viewport.set_height(bordered_inner(json_area).height as usize);

        let (list_area, content_area) = message_areas(body);
        doc.messages.list.set_height(bordered_inner(list_area).height as usize);
        doc.messages.body.set_height(bordered_inner(content_area).height as usize);
        doc.messages.body.set_len(self.message_lines(doc).len());
    }

    /// Scroll the message body back to the top after the index changed
    fn reset_body(&self, doc: &mut Document) {
        let height = doc.messages.body.height();
        doc.messages.body = Viewport::new(self.message_lines(doc).len(), height);
    }

    /// Column count available to rendered messages
    pub fn message_body_width(&self) -> usize {
        let (_, content_area) = message_areas(frame_areas(self.area).body);
        // one column for the scrollbar
        (bordered_inner(content_area).width as usize).saturating_sub(1)
    }

    /// The selected message, rendered and split into lines
    pub fn message_lines(&self, doc: &Document) -> Vec<String> {
        match doc.messages.current() {
            Some(message) => render_message(message, self.message_body_width(), &self.theme)
                .split('\n')
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Header title
    pub fn title(&self) -> String {
        match self.document() {
            Some(doc) => doc.name.clone(),
            None => "Claude JSONL Viewer".to_string(),
        }
    }

    /// Position part of the status line
    pub fn status_info(&self) -> String {
        let mut parts = Vec::new();
        match self.document() {
            None => parts.push(format!("{} files", self.files.len())),
            Some(doc) => match doc.mode {
                ViewMode::Json => {
                    let vp = &doc.json.viewport;
                    parts.push(format!("Line {}/{}", (vp.cursor() + 1).min(vp.len()), vp.len()));
                    parts.push(format!("{}%", vp.percent()));
                }
                ViewMode::Messages => {
                    let list = &doc.messages.list;
                    parts.push(format!(
                        "Message {}/{}",
                        (list.cursor() + 1).min(list.len()),
                        list.len()
                    ));
                    parts.push(format!("{}%", doc.messages.body.percent()));
                }
            },
        }
        if let Some(count) = self.keys.count() {
            parts.push(count.to_string());
        }
        parts.join(" | ")
    }
}
