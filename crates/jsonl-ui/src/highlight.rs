//! JSON syntax highlighting for pretty-printed lines
//!
//! Works line by line on the output of the pretty printer, so a string is
//! a key when the next non-space byte after its closing quote is `:`.
//! Malformed input is never rejected: unmatched bytes pass through as-is,
//! and stripping the escapes from the output always gives back the input.

use crate::ansi::paint;
use crate::theme::Theme;

/// Highlight every line of a pretty-printed document
pub fn highlight_json(content: &str, theme: &Theme) -> Vec<String> {
    content
        .split('\n')
        .map(|line| highlight_json_line(line, theme))
        .collect()
}

/// Highlight one line
pub fn highlight_json_line(line: &str, theme: &Theme) -> String {
    if line.trim().is_empty() {
        return line.to_string();
    }

    let bytes = line.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(line.len() * 2);
    let mut i = 0;

    while i < n {
        match bytes[i] {
            b'"' => {
                let end = string_end(bytes, i);
                let literal = &line[i..end];
                let mut k = end;
                while k < n && matches!(bytes[k], b' ' | b'\t') {
                    k += 1;
                }
                let style = if k < n && bytes[k] == b':' {
                    theme.json_key
                } else {
                    theme.json_string
                };
                out.push_str(&paint(style, literal));
                i = end;
            }
            b'-' | b'0'..=b'9' => {
                let mut j = i + 1;
                while j < n && matches!(bytes[j], b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') {
                    j += 1;
                }
                out.push_str(&paint(theme.json_number, &line[i..j]));
                i = j;
            }
            b't' | b'f' | b'n' => {
                let rest = &line[i..];
                match ["true", "false", "null"]
                    .into_iter()
                    .find(|kw| rest.starts_with(kw))
                {
                    Some(kw) => {
                        out.push_str(&paint(theme.json_keyword, kw));
                        i += kw.len();
                    }
                    None => {
                        out.push(bytes[i] as char);
                        i += 1;
                    }
                }
            }
            b'{' | b'}' | b'[' | b']' => {
                out.push_str(&paint(theme.json_brace, &line[i..i + 1]));
                i += 1;
            }
            _ => {
                // Copy a whole char so multi-byte text stays intact
                let ch_len = line[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&line[i..i + ch_len]);
                i += ch_len;
            }
        }
    }

    out
}

/// Byte index just past the string literal opening at `start`, or the end
/// of the line when the literal is unterminated
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ansi::{sgr, strip};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_gives_back_input() {
        let theme = Theme::default();
        let lines = [
            r#"    "key": "value","#,
            r#"    "n": -12.5e+3,"#,
            r#"    "ok": true, "none": null, "no": false"#,
            r#"    "quote": "say \"hi\"","#,
            r#"    "unterminated": "abc"#,
            r#"    "emoji": "日本語 ✓","#,
            "{",
            "    ],",
            "nothing special here",
            "trailing backslash \\",
            "",
            "    ",
        ];
        for line in lines {
            assert_eq!(strip(&highlight_json_line(line, &theme)), line);
        }
    }

    #[test]
    fn test_keys_and_values_styled_differently() {
        let theme = Theme::default();
        let out = highlight_json_line(r#"  "name": "Ada""#, &theme);
        let key = format!("{}\"name\"", sgr(theme.json_key));
        let value = format!("{}\"Ada\"", sgr(theme.json_string));
        assert!(out.contains(&key), "{out:?}");
        assert!(out.contains(&value), "{out:?}");
    }

    #[test]
    fn test_numbers_keywords_braces() {
        let theme = Theme::default();
        let out = highlight_json_line(r#"  "a": [1, true, null]"#, &theme);
        assert!(out.contains(&format!("{}1", sgr(theme.json_number))));
        assert!(out.contains(&format!("{}true", sgr(theme.json_keyword))));
        assert!(out.contains(&format!("{}null", sgr(theme.json_keyword))));
        assert!(out.contains(&format!("{}[", sgr(theme.json_brace))));
    }

    #[test]
    fn test_blank_line_unchanged() {
        let theme = Theme::default();
        assert_eq!(highlight_json_line("   ", &theme), "   ");
        assert_eq!(highlight_json("{\n\n}", &theme).len(), 3);
    }
}
