//! Case-insensitive search over styled lines
//!
//! Matching runs on visible text only. Case folding maps each char to one
//! char, so positions in the folded text line up with the original.

use crate::ansi::{segments, sgr, Segment, RESET};
use crate::theme::Theme;

/// Direction of a search step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Lowercase `s` one char at a time
pub fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Whether `text` contains `query`, ignoring case
pub fn line_matches(text: &str, query: &str) -> bool {
    !query.is_empty() && fold(text).contains(&fold(query))
}

/// Start positions (in chars) of non-overlapping matches, left to right
fn match_starts(haystack: &[char], needle: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    if needle.is_empty() || needle.len() > haystack.len() {
        return starts;
    }
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if haystack[pos..pos + needle.len()] == *needle {
            starts.push(pos);
            pos += needle.len();
        } else {
            pos += 1;
        }
    }
    starts
}

/// Wrap every occurrence of `query` in the visible text of `line` with the
/// match style. Existing escapes are kept where they were; the line comes
/// back unchanged when the query is empty or absent.
pub fn highlight_matches(line: &str, query: &str, theme: &Theme) -> String {
    if query.is_empty() {
        return line.to_string();
    }

    let segs = segments(line);
    let visible: Vec<char> = segs
        .iter()
        .filter_map(|seg| match seg {
            Segment::Text(text) => Some(text.chars().map(fold_char)),
            Segment::Style(_) => None,
        })
        .flatten()
        .collect();
    let needle: Vec<char> = query.chars().map(fold_char).collect();

    let starts = match_starts(&visible, &needle);
    if starts.is_empty() {
        return line.to_string();
    }

    let open = sgr(theme.search_match);
    let mut out = String::with_capacity(line.len() + starts.len() * (open.len() + RESET.len()));
    let mut pos = 0;
    let mut next = 0;
    let mut open_until: Option<usize> = None;

    for seg in segs {
        match seg {
            Segment::Style(code) => out.push_str(code),
            Segment::Text(text) => {
                for c in text.chars() {
                    if open_until.is_none() && starts.get(next) == Some(&pos) {
                        out.push_str(&open);
                        open_until = Some(pos + needle.len());
                        next += 1;
                    }
                    out.push(c);
                    pos += 1;
                    if open_until == Some(pos) {
                        out.push_str(RESET);
                        open_until = None;
                    }
                }
            }
        }
    }

    out
}

/// Find the next entry of `items` containing `query`, starting after
/// `current` and wrapping around; `current` itself is checked last.
pub fn find_match<S: AsRef<str>>(
    items: &[S],
    current: usize,
    direction: Direction,
    query: &str,
) -> Option<usize> {
    if query.is_empty() || items.is_empty() {
        return None;
    }
    let needle = fold(query);
    let total = items.len();
    let current = current.min(total - 1);

    (1..=total)
        .map(|step| match direction {
            Direction::Forward => (current + step) % total,
            Direction::Backward => (current + total - step) % total,
        })
        .find(|&idx| fold(items[idx].as_ref()).contains(&needle))
}
