//! String value extraction from pretty-printed JSON lines

/// A string value found on a single pretty-printed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringPreview {
    /// Object key, absent for array elements
    pub key: Option<String>,
    /// Unescaped string value
    pub value: String,
}

/// Extract the string value from a line shaped like `"key": "value",`
/// or `"value",`. Anything else (numbers, booleans, openers) yields `None`.
pub fn extract_string(line: &str) -> Option<StringPreview> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed).trim_end();

    let (first, rest) = split_string_literal(trimmed)?;
    let rest = rest.trim_start();

    if rest.is_empty() {
        return Some(StringPreview {
            key: None,
            value: unescape(first)?,
        });
    }

    let after_colon = rest.strip_prefix(':')?.trim_start();
    let (second, tail) = split_string_literal(after_colon)?;
    if !tail.trim().is_empty() {
        return None;
    }

    Some(StringPreview {
        key: Some(unescape(first)?),
        value: unescape(second)?,
    })
}

/// Split a leading JSON string literal (quotes included) from the rest
fn split_string_literal(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'"') {
        return None;
    }
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some((&s[..=i], &s[i + 1..])),
            _ => i += 1,
        }
    }
    None
}

fn unescape(literal: &str) -> Option<String> {
    serde_json::from_str::<String>(literal).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn keyed(key: &str, value: &str) -> Option<StringPreview> {
        Some(StringPreview {
            key: Some(key.to_string()),
            value: value.to_string(),
        })
    }

    #[test]
    fn test_extract_key_value() {
        assert_eq!(
            extract_string(r#"    "message": "Hello world","#),
            keyed("message", "Hello world")
        );
        assert_eq!(
            extract_string(r#"    "content": "Some content""#),
            keyed("content", "Some content")
        );
    }

    #[test]
    fn test_extract_unescapes() {
        assert_eq!(
            extract_string(r#"    "text": "Line 1\nLine 2""#),
            keyed("text", "Line 1\nLine 2")
        );
        assert_eq!(
            extract_string(r#"    "data": "He said \"hello\"""#),
            keyed("data", "He said \"hello\"")
        );
    }

    #[test]
    fn test_extract_array_element() {
        assert_eq!(
            extract_string(r#"        "array item","#),
            Some(StringPreview {
                key: None,
                value: "array item".to_string()
            })
        );
    }

    #[test]
    fn test_extract_rejects_non_strings() {
        assert_eq!(extract_string(r#"    "count": 42,"#), None);
        assert_eq!(extract_string(r#"    "enabled": true"#), None);
        assert_eq!(extract_string(r#"    "config": {"#), None);
        assert_eq!(extract_string("}"), None);
    }
}
