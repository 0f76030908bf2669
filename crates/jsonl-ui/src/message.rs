//! Message rendering for the messages view

use jsonl_core::{ContentBlock, Message, MessageKind};

use crate::ansi::{paint, paint_lines};
use crate::markdown::render_text;
use crate::theme::Theme;

/// Content never wraps narrower than this
pub const MIN_CONTENT_WIDTH: usize = 20;

/// Render one message as a styled multi-line string: a badge line followed
/// by each non-empty block, separated by blank lines
pub fn render_message(message: &Message, width: usize, theme: &Theme) -> String {
    let content_width = width.saturating_sub(4).max(MIN_CONTENT_WIDTH);

    let rendered: Vec<String> = message
        .blocks
        .iter()
        .map(|block| render_block(block, content_width, theme))
        .filter(|block| !block.is_empty())
        .collect();

    let mut content = rendered.join("\n\n");
    if message.is_meta {
        content = paint_lines(theme.meta, &content);
    }

    let badge = render_badge(message, theme);
    if content.is_empty() {
        badge
    } else {
        format!("{badge}\n{content}")
    }
}

fn render_badge(message: &Message, theme: &Theme) -> String {
    // tool results come back as user records
    if message.kind == MessageKind::User && message.has_tool_result() {
        return format!(
            "{} {}",
            paint(theme.badge_user, " user "),
            paint(theme.tool_result_header, "tool_result")
        );
    }

    let mut label = message.kind.name().to_string();
    if let Some(subtype) = &message.subtype {
        label = format!("{label} ({subtype})");
    }

    let mut badge = paint(theme.badge(&message.kind), &format!(" {label} "));
    if !message.kind.is_recognized() {
        badge.push(' ');
        badge.push_str(&paint(theme.warning, "⚠"));
    }
    badge
}

fn render_block(block: &ContentBlock, width: usize, theme: &Theme) -> String {
    match block {
        ContentBlock::Text { text } | ContentBlock::Plain { text } => {
            if text.trim().is_empty() {
                return String::new();
            }
            render_text(text, width, theme).join("\n")
        }
        ContentBlock::Thinking { text } => {
            if text.trim().is_empty() {
                return String::new();
            }
            let body = render_text(text, width, theme).join("\n");
            paint_lines(theme.thinking, &format!("💭 Thinking:\n{body}"))
        }
        ContentBlock::ToolUse { name, input } => {
            let header = paint(theme.tool_use_header, &format!("🔧 {name}"));
            if input.is_empty() {
                header
            } else {
                format!("{header}\n{input}")
            }
        }
        ContentBlock::ToolResult { content } => {
            let header = paint(theme.tool_result_header, "📤 Result");
            if content.is_empty() {
                header
            } else {
                format!("{header}\n{content}")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ansi::{sgr, strip};
    use jsonl_core::{parse_message_line, MessageKind};
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> ContentBlock {
        ContentBlock::Text {
            text: s.to_string(),
        }
    }

    #[test]
    fn test_assistant_badge() {
        let theme = Theme::default();
        let msg = Message::new(MessageKind::Assistant, vec![text("hello")]);
        let out = render_message(&msg, 80, &theme);
        assert!(out.starts_with(&format!("{} assistant ", sgr(theme.badge_assistant))));
        assert_eq!(strip(&out), " assistant \nhello");
    }

    #[test]
    fn test_unknown_kind_gets_warning() {
        let theme = Theme::default();
        let msg = parse_message_line(r#"{"type":"customtool","content":"ran it"}"#)
            .expect("record parses");
        let out = strip(&render_message(&msg, 80, &theme));
        assert!(out.starts_with(" customtool  ⚠"), "{out:?}");
        assert!(out.contains("ran it"));
    }

    #[test]
    fn test_tool_result_shows_pretty_json() {
        let theme = Theme::default();
        let line = r#"{"type":"user","message":{"role":"user","content":[{"type":"tool_result","tool_use_id":"t1","content":"{\"a\":1}"}]}}"#;
        let msg = parse_message_line(line).expect("record parses");
        let out = strip(&render_message(&msg, 80, &theme));
        assert!(out.starts_with(" user  tool_result"), "{out:?}");
        assert!(out.contains("📤 Result"));
        assert!(out.contains(r#""a": 1"#), "{out:?}");
    }

    #[test]
    fn test_tool_result_badge_replaces_user_label() {
        let theme = Theme::default();
        let line = r#"{"type":"user","subtype":"x","message":{"content":[{"type":"tool_result","content":"ok"}]}}"#;
        let msg = parse_message_line(line).expect("record parses");
        let out = render_message(&msg, 80, &theme);
        assert!(out.starts_with(&sgr(theme.badge_user)));
        assert_eq!(strip(&out).lines().next(), Some(" user  tool_result"));
    }

    #[test]
    fn test_tool_result_badge_only_for_user() {
        let theme = Theme::default();
        let line = r#"{"type":"assistant","message":{"content":[{"type":"tool_result","content":"ok"}]}}"#;
        let msg = parse_message_line(line).expect("record parses");
        let out = strip(&render_message(&msg, 80, &theme));
        assert_eq!(out.lines().next(), Some(" assistant "));
        assert!(out.contains("📤 Result"));
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let theme = Theme::default();
        let msg = Message::new(
            MessageKind::Assistant,
            vec![
                text("first"),
                text("  "),
                ContentBlock::ToolUse {
                    name: "Bash".to_string(),
                    input: "{}".to_string(),
                },
            ],
        );
        let out = strip(&render_message(&msg, 80, &theme));
        assert_eq!(out, " assistant \nfirst\n\n🔧 Bash\n{}");
    }

    #[test]
    fn test_thinking_is_dimmed() {
        let theme = Theme::default();
        let msg = Message::new(
            MessageKind::Assistant,
            vec![ContentBlock::Thinking {
                text: "pondering".to_string(),
            }],
        );
        let out = render_message(&msg, 80, &theme);
        assert!(out.contains(&sgr(theme.thinking)));
        assert_eq!(strip(&out), " assistant \n💭 Thinking:\npondering");
    }

    #[test]
    fn test_meta_and_subtype() {
        let theme = Theme::default();
        let mut msg = Message::new(MessageKind::System, vec![text("loaded")]);
        msg.subtype = Some("hook".to_string());
        msg.is_meta = true;
        let out = render_message(&msg, 80, &theme);
        assert!(out.contains(&sgr(theme.meta)));
        assert_eq!(strip(&out), " system (hook) \nloaded");
    }

    #[test]
    fn test_narrow_width_has_floor() {
        let theme = Theme::default();
        let msg = Message::new(MessageKind::User, vec![text("aaaa bbbb cccc dddd eeee")]);
        let out = strip(&render_message(&msg, 5, &theme));
        assert_eq!(out, " user \naaaa bbbb cccc dddd\neeee");
    }
}
