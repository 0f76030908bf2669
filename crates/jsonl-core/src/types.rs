//! Core type definitions for transcript data

use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;

/// Kind of a transcript record, taken from its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    User,
    Assistant,
    System,
    Summary,
    /// Any other record type, keeping the original name
    Unknown(String),
}

impl MessageKind {
    pub fn from_type(name: &str) -> Self {
        match name {
            "user" => MessageKind::User,
            "assistant" => MessageKind::Assistant,
            "system" => MessageKind::System,
            "summary" => MessageKind::Summary,
            other => MessageKind::Unknown(other.to_string()),
        }
    }

    /// The record type as it appears in the file
    pub fn name(&self) -> &str {
        match self {
            MessageKind::User => "user",
            MessageKind::Assistant => "assistant",
            MessageKind::System => "system",
            MessageKind::Summary => "summary",
            MessageKind::Unknown(name) => name,
        }
    }

    /// Whether the kind has dedicated rendering
    pub fn is_recognized(&self) -> bool {
        !matches!(self, MessageKind::Unknown(_))
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One semantic unit of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        text: String,
    },
    ToolUse {
        name: String,
        /// Tool input, pretty-printed with 4-space indentation
        input: String,
    },
    ToolResult {
        /// Result body, pretty-printed when it was JSON
        content: String,
    },
    Plain {
        text: String,
    },
}

impl ContentBlock {
    /// Block type name as used in transcripts
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Thinking { .. } => "thinking",
            ContentBlock::ToolUse { .. } => "tool_use",
            ContentBlock::ToolResult { .. } => "tool_result",
            ContentBlock::Plain { .. } => "plain",
        }
    }

    /// Optional label (tool name for tool_use)
    pub fn label(&self) -> Option<&str> {
        match self {
            ContentBlock::ToolUse { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The block's text body
    pub fn body(&self) -> &str {
        match self {
            ContentBlock::Text { text }
            | ContentBlock::Thinking { text }
            | ContentBlock::Plain { text } => text,
            ContentBlock::ToolUse { input, .. } => input,
            ContentBlock::ToolResult { content } => content,
        }
    }
}

/// A parsed transcript record
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    /// Subtype, mostly for system records
    pub subtype: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Record uuid
    pub id: String,
    pub blocks: Vec<ContentBlock>,
    /// Auxiliary records (skill loading etc.) rendered de-emphasized
    pub is_meta: bool,
}

impl Message {
    pub fn new(kind: MessageKind, blocks: Vec<ContentBlock>) -> Self {
        Self {
            kind,
            subtype: None,
            timestamp: None,
            id: String::new(),
            blocks,
            is_meta: false,
        }
    }

    pub fn has_tool_result(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolResult { .. }))
    }

    /// Unstyled text of every block, one block per paragraph
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if let Some(label) = block.label() {
                parts.push(format!("{}\n{}", label, block.body()));
            } else {
                parts.push(block.body().to_string());
            }
        }
        parts.join("\n\n")
    }

    /// Get preview text for list display
    pub fn preview(&self, max_len: usize) -> String {
        let preview = self
            .blocks
            .iter()
            .map(|b| match b.label() {
                Some(label) => label,
                None => b.body().lines().find(|l| !l.trim().is_empty()).unwrap_or(""),
            })
            .find(|s| !s.trim().is_empty())
            .unwrap_or("")
            .trim();

        let chars: Vec<char> = preview.chars().collect();
        if chars.len() > max_len {
            let truncated: String = chars[..max_len.saturating_sub(3)].iter().collect();
            format!("{}...", truncated)
        } else {
            preview.to_string()
        }
    }

    /// Format timestamp for display (HH:MM:SS)
    pub fn format_time(&self) -> String {
        match &self.timestamp {
            Some(ts) => ts.format("%H:%M:%S").to_string(),
            None => "--:--:--".to_string(),
        }
    }
}

/// A candidate transcript file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub display_name: String,
    pub modified: DateTime<Local>,
}

impl FileEntry {
    pub fn format_modified(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Directory to browse, plus the project it belongs to (if any)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDir {
    pub search_dir: PathBuf,
    pub project: Option<PathBuf>,
}

/// View modes for an open file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Pretty-printed JSON with syntax highlighting
    #[default]
    Json,
    /// Typed messages with role-aware rendering
    Messages,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Json => ViewMode::Messages,
            ViewMode::Messages => ViewMode::Json,
        }
    }

    /// Get view mode from key (1-2)
    pub fn from_key(key: char) -> Option<ViewMode> {
        match key {
            '1' => Some(ViewMode::Json),
            '2' => Some(ViewMode::Messages),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Json => "JSON",
            ViewMode::Messages => "MESSAGES",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_names() {
        assert_eq!(MessageKind::from_type("assistant"), MessageKind::Assistant);
        let unknown = MessageKind::from_type("customtool");
        assert_eq!(unknown.name(), "customtool");
        assert!(!unknown.is_recognized());
        assert!(MessageKind::Summary.is_recognized());
    }

    #[test]
    fn test_preview_truncates_first_line() {
        let msg = Message::new(
            MessageKind::User,
            vec![ContentBlock::Text {
                text: "\nabcdefghijklmnop\nsecond".to_string(),
            }],
        );
        assert_eq!(msg.preview(10), "abcdefg...");
        assert_eq!(msg.preview(40), "abcdefghijklmnop");
    }

    #[test]
    fn test_preview_prefers_tool_name() {
        let msg = Message::new(
            MessageKind::Assistant,
            vec![ContentBlock::ToolUse {
                name: "Bash".to_string(),
                input: "{}".to_string(),
            }],
        );
        assert_eq!(msg.preview(20), "Bash");
    }

    #[test]
    fn test_plain_text_joins_blocks() {
        let msg = Message::new(
            MessageKind::Assistant,
            vec![
                ContentBlock::Text {
                    text: "hello".to_string(),
                },
                ContentBlock::ToolUse {
                    name: "Read".to_string(),
                    input: "{}".to_string(),
                },
            ],
        );
        assert_eq!(msg.plain_text(), "hello\n\nRead\n{}");
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Json.toggle(), ViewMode::Messages);
        assert_eq!(ViewMode::Messages.toggle(), ViewMode::Json);
        assert_eq!(ViewMode::from_key('2'), Some(ViewMode::Messages));
    }
}
