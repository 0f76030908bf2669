//! Markdown and plain text rendering to width-wrapped styled lines

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use textwrap::{Options, WrapAlgorithm};

use crate::ansi::{paint, visible_width};
use crate::theme::Theme;

/// Substrings that suggest a text block is markdown
const MARKDOWN_SIGNALS: &[&str] = &[
    "```", "**", "__", "*", "_", "# ", "## ", "### ", "- ", "* ", "1. ", "[", "`", "> ", "---",
    "***",
];

/// Narrowest column a nested list or quote is squeezed into
const MIN_INNER_WIDTH: usize = 10;

pub fn looks_like_markdown(text: &str) -> bool {
    MARKDOWN_SIGNALS.iter().any(|signal| text.contains(signal))
}

/// Render a text block: markdown when it looks like markdown, otherwise a
/// greedy word wrap
pub fn render_text(text: &str, width: usize, theme: &Theme) -> Vec<String> {
    if looks_like_markdown(text) {
        render_markdown(text, width, theme)
    } else {
        wrap_plain(text, width)
    }
}

/// Greedy word wrap keeping existing line breaks
pub fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1)).wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

type Run = (Style, String);

/// Render markdown into styled lines no wider than `width`, except for
/// code lines and single words that do not fit
pub fn render_markdown(text: &str, width: usize, theme: &Theme) -> Vec<String> {
    let mut writer = Writer::new(width, theme);
    for event in Parser::new(text) {
        writer.event(event);
    }
    writer.finish()
}

struct Writer<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<String>,
    current: Vec<Run>,
    style_stack: Vec<Style>,
    in_code_block: bool,
    quote_depth: usize,
    /// Next number for ordered lists, `None` for bullets
    lists: Vec<Option<u64>>,
    /// Marker for the first line of the current item
    item_marker: Option<String>,
}

impl<'t> Writer<'t> {
    fn new(width: usize, theme: &'t Theme) -> Self {
        Self {
            theme,
            width,
            lines: Vec::new(),
            current: Vec::new(),
            style_stack: vec![Style::default()],
            in_code_block: false,
            quote_depth: 0,
            lists: Vec::new(),
            item_marker: None,
        }
    }

    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, style: Style) {
        let combined = self.style().patch(style);
        self.style_stack.push(combined);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn push_text(&mut self, text: &str, style: Style) {
        self.current.push((style, text.to_string()));
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    let prefix = self.quote_prefix();
                    for code_line in text.lines() {
                        let line = format!("{}  {}", prefix, paint(self.theme.code_block, code_line));
                        self.lines.push(line);
                    }
                } else {
                    let style = self.style();
                    self.push_text(&text, style);
                }
            }
            Event::Code(code) => {
                let style = self.theme.inline_code;
                self.push_text(&format!(" {} ", code), style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.push_text(" ", style);
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                let rule = "─".repeat(self.width.clamp(1, 40));
                self.lines.push(paint(self.theme.rule, &rule));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.theme.quote;
                self.push_text(html.trim_end(), style);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.blank();
                let prefix = "#".repeat(level as usize);
                self.push_text(&format!("{} ", prefix), self.theme.heading);
                self.push_style(self.theme.heading);
            }
            Tag::Paragraph => self.flush(),
            Tag::CodeBlock(kind) => {
                self.flush();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.lines
                            .push(paint(self.theme.rule, &format!("── {} ──", lang)));
                    }
                }
            }
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => self.push_style(self.theme.link),
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.pop_style();
                self.flush();
            }
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            _ => {}
        }
    }

    fn quote_prefix(&self) -> String {
        if self.quote_depth == 0 {
            String::new()
        } else {
            paint(self.theme.quote, &"│ ".repeat(self.quote_depth))
        }
    }

    /// Wrap the pending runs into finished lines
    fn flush(&mut self) {
        let marker = self.item_marker.take();
        if self.current.is_empty() {
            if let Some(marker) = marker {
                // an item whose content starts with a nested block
                self.item_marker = Some(marker);
            }
            return;
        }
        let runs = std::mem::take(&mut self.current);

        let quote = self.quote_prefix();
        let indent = "  ".repeat(self.lists.len().saturating_sub(1));
        let (first, rest) = match marker {
            Some(marker) => {
                let hang = " ".repeat(visible_width(&marker));
                (format!("{indent}{marker}"), format!("{indent}{hang}"))
            }
            None if !self.lists.is_empty() => {
                let hang = format!("{indent}  ");
                (hang.clone(), hang)
            }
            None => (String::new(), String::new()),
        };

        let prefix_width = visible_width(&quote) + visible_width(&first);
        let inner = self.width.saturating_sub(prefix_width).max(MIN_INNER_WIDTH);

        for (i, line) in wrap_runs(&runs, inner).into_iter().enumerate() {
            let lead = if i == 0 { &first } else { &rest };
            let body: String = line.iter().map(|(style, text)| paint(*style, text)).collect();
            self.lines.push(format!("{quote}{lead}{body}"));
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Split text into alternating whitespace and word pieces
fn pieces(text: &str) -> impl Iterator<Item = (bool, &str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != is_space)
            .map_or(rest.len(), |(i, _)| i);
        let (piece, tail) = rest.split_at(end);
        rest = tail;
        Some((is_space, piece))
    })
}

fn push_run(line: &mut Vec<Run>, style: Style, text: &str) {
    match line.last_mut() {
        Some((last, buf)) if *last == style => buf.push_str(text),
        _ => line.push((style, text.to_string())),
    }
}

/// Greedy wrap of styled runs. Whitespace at a break is dropped; a word
/// wider than `width` gets a line of its own.
fn wrap_runs(runs: &[Run], width: usize) -> Vec<Vec<Run>> {
    let mut lines: Vec<Vec<Run>> = vec![Vec::new()];
    let mut line_width = 0;
    let mut pending: Vec<(Style, &str)> = Vec::new();
    let mut pending_width = 0;

    for (style, text) in runs {
        for (is_space, piece) in pieces(text) {
            let piece_width = visible_width(piece);
            if is_space {
                pending.push((*style, piece));
                pending_width += piece_width;
                continue;
            }

            if line_width > 0 && line_width + pending_width + piece_width > width {
                lines.push(Vec::new());
                line_width = 0;
            } else if line_width > 0 {
                if let Some(line) = lines.last_mut() {
                    for (ws_style, ws) in &pending {
                        push_run(line, *ws_style, ws);
                    }
                }
                line_width += pending_width;
            }
            pending.clear();
            pending_width = 0;

            if let Some(line) = lines.last_mut() {
                push_run(line, *style, piece);
            }
            line_width += piece_width;
        }
    }

    lines
}
