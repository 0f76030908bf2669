//! ANSI escape handling for styled lines
//!
//! A styled line is visible text interleaved with CSI sequences of the form
//! `ESC '[' (digit | ';' | '?')* letter`. Everything here works on the
//! segment sequence produced by [`segments`], so escapes are parsed once
//! per pass and never counted toward visible width.
//!
//! Width is measured in terminal columns per `char` (`unicode-width`), so
//! wide characters take two columns and combining marks none.

use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthChar;

/// Resets every attribute
pub const RESET: &str = "\x1b[0m";

/// A run of a styled line: either visible text or one escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Style(&'a str),
}

/// Byte length of the escape sequence starting at byte `i`, if any
pub fn escape_at(s: &str, i: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(i) != Some(&0x1b) || bytes.get(i + 1) != Some(&b'[') {
        return None;
    }
    for (j, &b) in bytes.iter().enumerate().skip(i + 2) {
        if b.is_ascii_alphabetic() {
            return Some(j + 1 - i);
        }
        if !(b.is_ascii_digit() || b == b';' || b == b'?') {
            return None;
        }
    }
    None
}

/// Split a styled line into text runs and escape sequences
pub fn segments(s: &str) -> Vec<Segment<'_>> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == 0x1b {
            if let Some(len) = escape_at(s, i) {
                if text_start < i {
                    out.push(Segment::Text(&s[text_start..i]));
                }
                out.push(Segment::Style(&s[i..i + len]));
                i += len;
                text_start = i;
                continue;
            }
        }
        i += 1;
    }
    if text_start < s.len() {
        out.push(Segment::Text(&s[text_start..]));
    }
    out
}

/// Remove every escape sequence
pub fn strip(s: &str) -> String {
    segments(s)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Text(text) => Some(text),
            Segment::Style(_) => None,
        })
        .collect()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Columns taken by the visible text
pub fn visible_width(s: &str) -> usize {
    segments(s)
        .into_iter()
        .map(|seg| match seg {
            Segment::Text(text) => text.chars().map(char_width).sum(),
            Segment::Style(_) => 0,
        })
        .sum()
}

/// Keep at most `width` visible columns. Escapes are copied verbatim up to
/// the cut; a reset is appended when the line carried any styling.
pub fn truncate(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut used = 0;
    let mut styled = false;

    'outer: for seg in segments(s) {
        match seg {
            Segment::Style(code) => {
                out.push_str(code);
                styled = true;
            }
            Segment::Text(text) => {
                for c in text.chars() {
                    let w = char_width(c);
                    if used + w > width {
                        break 'outer;
                    }
                    used += w;
                    out.push(c);
                }
            }
        }
    }

    if styled && !out.ends_with(RESET) {
        out.push_str(RESET);
    }
    out
}

/// Right-pad with spaces to exactly `width` columns, truncating when wider
pub fn pad(s: &str, width: usize) -> String {
    let current = visible_width(s);
    if current == width {
        return s.to_string();
    }
    let mut out = if current > width {
        truncate(s, width)
    } else {
        s.to_string()
    };
    let filled = visible_width(&out);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(filled)));
    out
}

/// SGR parameter for a color
fn color_code(color: Color, foreground: bool) -> String {
    let base = if foreground { 30 } else { 40 };
    let bright = if foreground { 90 } else { 100 };
    match color {
        Color::Reset => (if foreground { 39 } else { 49 }).to_string(),
        Color::Black => base.to_string(),
        Color::Red => (base + 1).to_string(),
        Color::Green => (base + 2).to_string(),
        Color::Yellow => (base + 3).to_string(),
        Color::Blue => (base + 4).to_string(),
        Color::Magenta => (base + 5).to_string(),
        Color::Cyan => (base + 6).to_string(),
        Color::Gray => (base + 7).to_string(),
        Color::DarkGray => bright.to_string(),
        Color::LightRed => (bright + 1).to_string(),
        Color::LightGreen => (bright + 2).to_string(),
        Color::LightYellow => (bright + 3).to_string(),
        Color::LightBlue => (bright + 4).to_string(),
        Color::LightMagenta => (bright + 5).to_string(),
        Color::LightCyan => (bright + 6).to_string(),
        Color::White => (bright + 7).to_string(),
        Color::Indexed(i) => format!("{};5;{}", base + 8, i),
        Color::Rgb(r, g, b) => format!("{};2;{};{};{}", base + 8, r, g, b),
    }
}

/// The escape sequence that switches the terminal to `style`;
/// empty for the default style
pub fn sgr(style: Style) -> String {
    let mut codes: Vec<String> = Vec::new();

    let modifiers = [
        (Modifier::BOLD, "1"),
        (Modifier::DIM, "2"),
        (Modifier::ITALIC, "3"),
        (Modifier::UNDERLINED, "4"),
        (Modifier::REVERSED, "7"),
    ];
    for (modifier, code) in modifiers {
        if style.add_modifier.contains(modifier) {
            codes.push(code.to_string());
        }
    }
    if let Some(fg) = style.fg {
        codes.push(color_code(fg, true));
    }
    if let Some(bg) = style.bg {
        codes.push(color_code(bg, false));
    }

    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

/// Wrap `text` in `style`, followed by a reset
pub fn paint(style: Style, text: &str) -> String {
    let start = sgr(style);
    if text.is_empty() || start.is_empty() {
        return text.to_string();
    }
    format!("{start}{text}{RESET}")
}

/// Paint each line separately so the style survives splitting on `\n`
pub fn paint_lines(style: Style, text: &str) -> String {
    text.split('\n')
        .map(|line| paint(style, line))
        .collect::<Vec<_>>()
        .join("\n")
}
