//! Color theme shared by every renderer

use jsonl_core::MessageKind;
use ratatui::style::{Color, Modifier, Style};

/// All styles used by the viewer. Built once at startup and passed by
/// reference into renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // JSON highlighting
    pub json_key: Style,
    pub json_string: Style,
    pub json_number: Style,
    pub json_keyword: Style,
    pub json_brace: Style,

    pub search_match: Style,

    // Message badges
    pub badge_user: Style,
    pub badge_assistant: Style,
    pub badge_system: Style,
    pub badge_summary: Style,
    pub badge_unknown: Style,

    pub warning: Style,
    pub thinking: Style,
    pub tool_use_header: Style,
    pub tool_result_header: Style,
    pub meta: Style,

    // Markdown
    pub heading: Style,
    pub code_block: Style,
    pub inline_code: Style,
    pub link: Style,
    pub quote: Style,
    pub rule: Style,

    // Chrome
    pub title: Style,
    pub selected: Style,
    pub dimmed: Style,
    pub help: Style,
    pub search_prompt: Style,
    pub error: Style,
    pub cursor_gutter: Style,
    pub gutter: Style,
    pub border: Style,
    pub border_focused: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let fg = |n: u8| Style::default().fg(Color::Indexed(n));
        let badge = |bg: u8| {
            Style::default()
                .fg(Color::Indexed(15))
                .bg(Color::Indexed(bg))
                .add_modifier(Modifier::BOLD)
        };

        Self {
            json_key: fg(81),
            json_string: fg(114),
            json_number: fg(141),
            json_keyword: fg(208),
            json_brace: fg(245),

            search_match: Style::default()
                .fg(Color::Black)
                .bg(Color::Indexed(226))
                .add_modifier(Modifier::BOLD),

            badge_user: badge(27),
            badge_assistant: badge(34),
            badge_system: badge(220).fg(Color::Indexed(0)),
            badge_summary: badge(99),
            badge_unknown: badge(240),

            warning: fg(196).add_modifier(Modifier::BOLD),
            thinking: fg(243).add_modifier(Modifier::ITALIC),
            tool_use_header: fg(44).add_modifier(Modifier::BOLD),
            tool_result_header: fg(214).add_modifier(Modifier::BOLD),
            meta: fg(243),

            heading: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            code_block: Style::default().fg(Color::Yellow),
            inline_code: Style::default().fg(Color::White).bg(Color::DarkGray),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default().fg(Color::DarkGray),
            rule: Style::default().fg(Color::DarkGray),

            title: fg(205).add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Indexed(229))
                .bg(Color::Indexed(57)),
            dimmed: Style::default().fg(Color::DarkGray),
            help: fg(241),
            search_prompt: fg(214),
            error: Style::default().fg(Color::Red),
            cursor_gutter: fg(214).add_modifier(Modifier::BOLD),
            gutter: fg(240),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
        }
    }
}

impl Theme {
    /// Badge style for a message kind
    pub fn badge(&self, kind: &MessageKind) -> Style {
        match kind {
            MessageKind::User => self.badge_user,
            MessageKind::Assistant => self.badge_assistant,
            MessageKind::System => self.badge_system,
            MessageKind::Summary => self.badge_summary,
            MessageKind::Unknown(_) => self.badge_unknown,
        }
    }

    /// Foreground used for a kind in the message list
    pub fn kind_color(&self, kind: &MessageKind) -> Style {
        match self.badge(kind).bg {
            Some(bg) => Style::default().fg(bg),
            None => Style::default(),
        }
    }
}
