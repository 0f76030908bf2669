//! Cursor and scroll state for a scrollable list, plus vim-style count and
//! chord handling

use std::ops::Range;

/// A cursor motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Down,
    Up,
    HalfPageDown,
    HalfPageUp,
    Top,
    Bottom,
}

/// Cursor over `len` items shown `height` at a time.
///
/// Whenever `len >= height`, `offset <= cursor < offset + height` holds, so
/// the cursor is always on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    cursor: usize,
    offset: usize,
    height: usize,
    len: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Viewport {
    pub fn new(len: usize, height: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            height: height.max(1),
            len,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Items currently on screen
    pub fn visible_range(&self) -> Range<usize> {
        self.offset..(self.offset + self.height).min(self.len)
    }

    /// Scroll position in percent, 100 when everything fits
    pub fn percent(&self) -> usize {
        let max = self.max_offset();
        if max == 0 {
            100
        } else {
            self.offset * 100 / max
        }
    }

    pub fn half_page(&self) -> usize {
        (self.height / 2).max(1)
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.ensure_visible();
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.ensure_visible();
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let target = self.cursor.saturating_add_signed(delta);
        self.cursor = target.min(self.len - 1);
        self.ensure_visible();
    }

    pub fn goto(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.cursor = index.min(self.len - 1);
        self.ensure_visible();
    }

    pub fn goto_top(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.goto(self.len.saturating_sub(1));
    }

    /// Scroll the window itself, pinning the cursor to its first row
    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
        self.cursor = self.offset.min(self.len.saturating_sub(1));
    }

    /// Apply a motion repeated `count` times. With a count, `Bottom` jumps
    /// to that 1-based position instead.
    pub fn apply(&mut self, motion: Motion, count: Option<usize>) {
        let n = count.unwrap_or(1) as isize;
        let half = self.half_page() as isize;
        match motion {
            Motion::Down => self.move_by(n),
            Motion::Up => self.move_by(-n),
            Motion::HalfPageDown => self.move_by(half.saturating_mul(n)),
            Motion::HalfPageUp => self.move_by(-half.saturating_mul(n)),
            Motion::Top => self.goto_top(),
            Motion::Bottom => match count {
                Some(line) => self.goto(line.saturating_sub(1)),
                None => self.goto_bottom(),
            },
        }
    }

    fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.height)
    }

    fn ensure_visible(&mut self) {
        if self.len == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.offset = self.offset.min(self.max_offset());
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
    }
}

/// A key as seen by the count/chord machinery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Digit(char),
    Motion(Motion),
    /// First or second key of a two-key chord (`gg`)
    Chord(char),
    /// Anything else; discards pending state
    Other,
}

const MAX_COUNT_DIGITS: usize = 7;

/// Pending count digits and a half-typed chord
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingKeys {
    count: String,
    chord: Option<char>,
}

impl PendingKeys {
    /// The count typed so far, for the status line
    pub fn count(&self) -> Option<&str> {
        (!self.count.is_empty()).then_some(self.count.as_str())
    }

    pub fn clear(&mut self) {
        self.count.clear();
        self.chord = None;
    }

    /// Feed a key; returns the motion to perform (and its count) once one
    /// is complete.
    ///
    /// A leading `0` is a motion to the top, not a count digit. A chord key
    /// followed by anything but itself is dropped.
    pub fn resolve(&mut self, key: NavKey) -> Option<(Motion, Option<usize>)> {
        match key {
            NavKey::Digit(d) => {
                self.chord = None;
                if d == '0' && self.count.is_empty() {
                    return Some((Motion::Top, None));
                }
                if self.count.len() < MAX_COUNT_DIGITS {
                    self.count.push(d);
                }
                None
            }
            NavKey::Motion(motion) => {
                self.chord = None;
                let count = self.count.parse().ok().filter(|n| *n > 0);
                self.count.clear();
                Some((motion, count))
            }
            NavKey::Chord(c) => {
                self.count.clear();
                if self.chord.take() == Some(c) {
                    Some((Motion::Top, None))
                } else {
                    self.chord = Some(c);
                    None
                }
            }
            NavKey::Other => {
                self.clear();
                None
            }
        }
    }
}
