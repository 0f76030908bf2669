//! JSONL decoding: pretty-printed JSON text and typed messages

use crate::error::LoadError;
use crate::types::{ContentBlock, Message, MessageKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Serialize a value with 4-space indentation
pub fn pretty_print_value(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Recursively replace strings holding JSON objects/arrays with the parsed value
pub fn expand_nested(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let trimmed = s.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                if let Ok(parsed) = serde_json::from_str::<Value>(&s) {
                    return expand_nested(parsed);
                }
            }
            Value::String(s)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(expand_nested).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, expand_nested(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Pretty-print one raw JSONL record; unparseable input comes back verbatim
pub fn pretty_print_record(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => pretty_print_value(&expand_nested(value)),
        Err(e) => {
            debug!(error = %e, "record is not valid JSON, keeping raw line");
            raw.to_string()
        }
    }
}

/// Pretty-print every record of a reader, records separated by a blank line
pub fn pretty_print_reader<R: BufRead>(reader: R) -> std::io::Result<String> {
    let mut records = Vec::new();
    for raw in read_lines(reader) {
        let raw = raw?;
        if raw.trim().is_empty() {
            continue;
        }
        records.push(pretty_print_record(&raw));
    }
    Ok(records.join("\n\n"))
}

/// Read a JSONL file and return pretty-printed JSON content
/// with nested JSON strings expanded
pub fn pretty_print_file<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
    pretty_print_reader(BufReader::new(file)).map_err(|e| LoadError::io(path, e))
}

/// Parse a JSONL file into messages, skipping lines that are not JSON objects
pub fn parse_messages_file<P: AsRef<Path>>(path: P) -> Result<Vec<Message>, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
    parse_messages_reader(BufReader::new(file)).map_err(|e| LoadError::io(path, e))
}

pub fn parse_messages_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<Message>> {
    let mut messages = Vec::new();
    for (line_number, raw) in read_lines(reader).enumerate() {
        let raw = raw?;
        if raw.trim().is_empty() {
            continue;
        }
        match parse_message_line(&raw) {
            Some(message) => messages.push(message),
            None => debug!(line = line_number + 1, "skipping record"),
        }
    }
    Ok(messages)
}

/// Parse a single JSONL line into a Message
pub fn parse_message_line(raw: &str) -> Option<Message> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let record = value.as_object()?;
    parse_record(record)
}

/// Lines split on `\n`, decoded lossily so one bad byte does not end the file
fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.split(b'\n').map(|chunk| {
        chunk.map(|bytes| {
            let mut line = String::from_utf8_lossy(&bytes).into_owned();
            if line.ends_with('\r') {
                line.pop();
            }
            line
        })
    })
}

fn str_field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn parse_record(record: &Map<String, Value>) -> Option<Message> {
    let type_name = str_field(record, "type").unwrap_or_default();

    // Snapshots carry no conversational content
    if type_name == "file-history-snapshot" {
        return None;
    }

    let kind = MessageKind::from_type(type_name);
    let blocks = match &kind {
        MessageKind::User | MessageKind::Assistant => message_blocks(record),
        MessageKind::System => vec![ContentBlock::Plain {
            text: str_field(record, "content").unwrap_or_default().to_string(),
        }],
        MessageKind::Summary => vec![ContentBlock::Plain {
            text: str_field(record, "summary").unwrap_or_default().to_string(),
        }],
        MessageKind::Unknown(_) => unknown_blocks(record),
    };

    Some(Message {
        kind,
        subtype: str_field(record, "subtype").map(str::to_string),
        timestamp: str_field(record, "timestamp")
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc)),
        id: str_field(record, "uuid").unwrap_or_default().to_string(),
        blocks,
        is_meta: record.get("isMeta").and_then(Value::as_bool).unwrap_or(false),
    })
}

/// Raw content block as found in `message.content`
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        content: Value,
    },
    #[serde(other)]
    Other,
}

fn message_blocks(record: &Map<String, Value>) -> Vec<ContentBlock> {
    let Some(content) = record.get("message").and_then(|m| m.get("content")) else {
        return Vec::new();
    };

    match content {
        Value::String(text) => vec![ContentBlock::Text { text: text.clone() }],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<RawBlock>(item.clone()).ok())
            .filter_map(convert_block)
            .collect(),
        _ => Vec::new(),
    }
}

fn convert_block(raw: RawBlock) -> Option<ContentBlock> {
    match raw {
        RawBlock::Text { text } => Some(ContentBlock::Text { text }),
        RawBlock::Thinking { thinking } => Some(ContentBlock::Thinking { text: thinking }),
        RawBlock::ToolUse { name, input } => Some(ContentBlock::ToolUse {
            name,
            input: pretty_print_value(&input),
        }),
        RawBlock::ToolResult { content } => Some(ContentBlock::ToolResult {
            content: tool_result_text(&content),
        }),
        RawBlock::Other => None,
    }
}

/// Tool result bodies: any valid JSON text is pretty-printed, text parts
/// are joined
fn tool_result_text(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => pretty_print_value(&parsed),
            Err(_) => s.clone(),
        },
        Value::Array(parts) if parts.iter().all(|p| p.get("text").is_some()) => parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        other => pretty_print_value(other),
    }
}

fn unknown_blocks(record: &Map<String, Value>) -> Vec<ContentBlock> {
    for key in ["content", "message", "text", "summary"] {
        match record.get(key) {
            Some(Value::String(s)) => return vec![ContentBlock::Plain { text: s.clone() }],
            Some(v @ Value::Object(_)) => {
                return vec![ContentBlock::Plain {
                    text: pretty_print_value(v),
                }]
            }
            _ => {}
        }
    }

    vec![ContentBlock::Plain {
        text: pretty_print_value(&Value::Object(record.clone())),
    }]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_pretty_print_uses_four_spaces() {
        let value: Value = serde_json::from_str(r#"{"b":[1,true],"a":null}"#).unwrap();
        let expected = "{\n    \"a\": null,\n    \"b\": [\n        1,\n        true\n    ]\n}";
        assert_eq!(pretty_print_value(&value), expected);
    }

    #[test]
    fn test_expand_nested_string() {
        let expanded = expand_nested(Value::String(r#"{"strategyName":"TestStrategy"}"#.into()));
        assert_eq!(expanded["strategyName"], "TestStrategy");
    }

    #[test]
    fn test_expand_nested_inside_object() {
        let value: Value = serde_json::from_str(r#"{"content":"{\"inner\": \"value\"}"}"#).unwrap();
        let expanded = expand_nested(value);
        assert_eq!(expanded["content"]["inner"], "value");
    }

    #[test]
    fn test_expand_nested_leaves_plain_strings() {
        let value = Value::String("[not json".into());
        assert_eq!(expand_nested(value.clone()), value);
    }

    #[test]
    fn test_pretty_print_reader_separates_records() {
        let input = "{\"type\":\"user\",\"content\":\"{\\\"strategyName\\\":\\\"TestStrategy\\\"}\"}\n\nnot json\n";
        let out = pretty_print_reader(Cursor::new(input)).unwrap();
        assert!(!out.contains(r#"\"strategyName\""#));
        assert!(out.contains("        \"strategyName\": \"TestStrategy\""));
        assert!(out.ends_with("}\n\nnot json"));
    }

    #[test]
    fn test_pretty_print_file_missing() {
        let err = pretty_print_file("/nonexistent/file.jsonl").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/file.jsonl"));
    }

    #[test]
    fn test_parse_messages_reader_kinds() {
        let data = r#"{"type":"user","message":{"role":"user","content":"Hello, how are you?"},"uuid":"test-1","timestamp":"2026-02-02T10:00:00.000Z"}
{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"I'm doing well"}]},"uuid":"test-2","timestamp":"2026-02-02T10:00:01.000Z"}
{"type":"system","content":"System message here","subtype":"info","uuid":"test-3"}
{"type":"summary","summary":"Test conversation","uuid":"test-4"}
{"type":"file-history-snapshot","snapshot":{}}
garbage"#;
        let messages = parse_messages_reader(Cursor::new(data)).unwrap();
        let kinds: Vec<&str> = messages.iter().map(|m| m.kind.name()).collect();
        assert_eq!(kinds, vec!["user", "assistant", "system", "summary"]);
        assert_eq!(
            messages[0].blocks,
            vec![ContentBlock::Text {
                text: "Hello, how are you?".to_string()
            }]
        );
        assert_eq!(messages[0].format_time(), "10:00:00");
        assert_eq!(messages[2].subtype.as_deref(), Some("info"));
        assert_eq!(messages[3].blocks[0].body(), "Test conversation");
    }

    #[test]
    fn test_parse_tool_result_pretty_prints_json() {
        let raw = r#"{"type":"user","message":{"role":"user","content":[{"type":"tool_result","tool_use_id":"t","content":"{\"a\":1}"}]}}"#;
        let message = parse_message_line(raw).unwrap();
        assert_eq!(
            message.blocks,
            vec![ContentBlock::ToolResult {
                content: "{\n    \"a\": 1\n}".to_string()
            }]
        );
        assert!(message.has_tool_result());
    }

    #[test]
    fn test_parse_tool_result_scalar_json_text() {
        let raw = r#"{"type":"user","message":{"content":[{"type":"tool_result","content":"\"caf\\u00e9\""},{"type":"tool_result","content":" 42 "},{"type":"tool_result","content":"exit 0"}]}}"#;
        let message = parse_message_line(raw).unwrap();
        assert_eq!(message.blocks[0].body(), "\"café\"");
        assert_eq!(message.blocks[1].body(), "42");
        assert_eq!(message.blocks[2].body(), "exit 0");
    }

    #[test]
    fn test_parse_tool_result_text_parts() {
        let raw = r#"{"type":"user","message":{"content":[{"type":"tool_result","content":[{"type":"text","text":"one"},{"type":"text","text":"two"}]}]}}"#;
        let message = parse_message_line(raw).unwrap();
        assert_eq!(message.blocks[0].body(), "one\ntwo");
    }

    #[test]
    fn test_parse_assistant_blocks() {
        let raw = r#"{"type":"assistant","isMeta":true,"message":{"content":[{"type":"thinking","thinking":"hmm"},{"type":"tool_use","id":"x","name":"Bash","input":{"command":"ls"}},{"type":"image","source":{}}]}}"#;
        let message = parse_message_line(raw).unwrap();
        assert!(message.is_meta);
        assert_eq!(
            message.blocks,
            vec![
                ContentBlock::Thinking {
                    text: "hmm".to_string()
                },
                ContentBlock::ToolUse {
                    name: "Bash".to_string(),
                    input: "{\n    \"command\": \"ls\"\n}".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_unknown_kind_keeps_name() {
        let message = parse_message_line(r#"{"type":"customtool","text":"payload"}"#).unwrap();
        assert_eq!(message.kind, MessageKind::Unknown("customtool".to_string()));
        assert_eq!(message.blocks[0].body(), "payload");

        let fallback = parse_message_line(r#"{"type":"progress","step":3}"#).unwrap();
        assert!(fallback.blocks[0].body().contains("\"step\": 3"));
    }

    #[test]
    fn test_parse_messages_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("test.jsonl");
        std::fs::write(&path, "{\"type\":\"summary\",\"summary\":\"s\"}\n").unwrap();
        let messages = parse_messages_file(&path).unwrap();
        assert_eq!(messages.len(), 1);
    }
}
