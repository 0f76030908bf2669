//! Event handling for the TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which key map applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a search query
    Search,
}

/// Actions that can be triggered by events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the application
    Quit,
    /// Go back one level (`q`)
    Back,
    /// Clear the search, or go back when there is none (`Esc`)
    Escape,
    /// Open the selected file
    Open,
    /// Move down
    Down,
    /// Move up
    Up,
    /// Half page down
    HalfPageDown,
    /// Half page up
    HalfPageUp,
    /// Go to first line
    Top,
    /// Go to last line, or to the line given by a count
    Bottom,
    /// First or second `g` of `gg`
    PressG,
    /// Count digit
    Digit(char),
    /// Switch between JSON and messages views
    ToggleMode,
    /// Show or hide the string preview pane
    TogglePreview,
    /// Re-read the open file
    Reload,
    /// Start search
    StartSearch,
    /// Cancel search
    CancelSearch,
    /// Submit search
    SubmitSearch,
    /// Search input character
    SearchInput(char),
    /// Search backspace
    SearchBackspace,
    /// Next search match
    NextMatch,
    /// Previous search match
    PrevMatch,
    /// Toggle help overlay
    ToggleHelp,
    /// Terminal was resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,
    /// No action
    None,
}

/// Handle a terminal event and return the corresponding action
pub fn handle_event(event: Event, mode: InputMode) -> AppAction {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(key, mode),
        Event::Resize(width, height) => AppAction::Resize(width, height),
        _ => AppAction::None,
    }
}

/// Handle a key event
fn handle_key(key: KeyEvent, mode: InputMode) -> AppAction {
    // Search mode has different bindings
    if mode == InputMode::Search {
        return handle_search_key(key);
    }

    // Check for Ctrl modifiers
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('l') => AppAction::Redraw,
            KeyCode::Char('u') => AppAction::HalfPageUp,
            KeyCode::Char('d') => AppAction::HalfPageDown,
            _ => AppAction::None,
        };
    }

    // Normal mode bindings
    match key.code {
        KeyCode::Char('q') => AppAction::Back,
        KeyCode::Esc => AppAction::Escape,
        KeyCode::Enter => AppAction::Open,

        // Navigation (vim-style)
        KeyCode::Char('j') | KeyCode::Down => AppAction::Down,
        KeyCode::Char('k') | KeyCode::Up => AppAction::Up,
        KeyCode::Char('g') => AppAction::PressG,
        KeyCode::Char('G') | KeyCode::End => AppAction::Bottom,
        KeyCode::Home => AppAction::Top,
        KeyCode::PageUp => AppAction::HalfPageUp,
        KeyCode::PageDown => AppAction::HalfPageDown,
        KeyCode::Char(c) if c.is_ascii_digit() => AppAction::Digit(c),

        // View mode
        KeyCode::Tab => AppAction::ToggleMode,
        KeyCode::Char('p') => AppAction::TogglePreview,
        KeyCode::Char('r') => AppAction::Reload,

        // Search
        KeyCode::Char('/') => AppAction::StartSearch,
        KeyCode::Char('n') => AppAction::NextMatch,
        KeyCode::Char('N') => AppAction::PrevMatch,

        KeyCode::Char('?') => AppAction::ToggleHelp,

        _ => AppAction::None,
    }
}

/// Handle key events in search mode
fn handle_search_key(key: KeyEvent) -> AppAction {
    match key.code {
        KeyCode::Esc => AppAction::CancelSearch,
        KeyCode::Enter => AppAction::SubmitSearch,
        KeyCode::Backspace => AppAction::SearchBackspace,
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => AppAction::Quit,
                    'g' => AppAction::CancelSearch,
                    _ => AppAction::None,
                }
            } else {
                AppAction::SearchInput(c)
            }
        }
        _ => AppAction::None,
    }
}

/// Key binding help text
pub const HELP_TEXT: &str = r#"
╭─────────────────────────────────────────╮
│               jsonl-view                │
│              Key Bindings               │
├─────────────────────────────────────────┤
│                                         │
│  Navigation                             │
│  ─────────                              │
│  j/k, ↑/↓    Move down/up               │
│  ctrl-d/u    Half page down/up          │
│  gg, 0       Go to top                  │
│  G           Go to bottom               │
│  5j, 20G     Repeat / jump to line      │
│  Enter       Open file                  │
│                                         │
│  Viewer                                 │
│  ──────                                 │
│  Tab         Toggle JSON / messages     │
│  p           String preview (JSON)      │
│  r           Reload file                │
│                                         │
│  Search                                 │
│  ──────                                 │
│  /           Start search               │
│  n/N         Next/prev match            │
│  Esc         Clear search               │
│                                         │
│  Other                                  │
│  ─────                                  │
│  ctrl-l      Redraw screen              │
│  ?           Show this help             │
│  q, Esc      Back / quit                │
│  ctrl-c      Quit                       │
│                                         │
╰─────────────────────────────────────────╯
"#;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_normal_bindings() {
        let normal = InputMode::Normal;
        assert_eq!(handle_event(key(KeyCode::Char('j')), normal), AppAction::Down);
        assert_eq!(handle_event(key(KeyCode::Char('5')), normal), AppAction::Digit('5'));
        assert_eq!(handle_event(key(KeyCode::Char('g')), normal), AppAction::PressG);
        assert_eq!(handle_event(key(KeyCode::Tab), normal), AppAction::ToggleMode);
        assert_eq!(handle_event(key(KeyCode::Esc), normal), AppAction::Escape);
        assert_eq!(handle_event(ctrl('d'), normal), AppAction::HalfPageDown);
        assert_eq!(handle_event(ctrl('c'), normal), AppAction::Quit);
    }

    #[test]
    fn test_search_bindings() {
        let search = InputMode::Search;
        assert_eq!(handle_event(key(KeyCode::Char('j')), search), AppAction::SearchInput('j'));
        assert_eq!(handle_event(key(KeyCode::Enter), search), AppAction::SubmitSearch);
        assert_eq!(handle_event(key(KeyCode::Esc), search), AppAction::CancelSearch);
        assert_eq!(handle_event(ctrl('g'), search), AppAction::CancelSearch);
        assert_eq!(handle_event(ctrl('c'), search), AppAction::Quit);
    }

    #[test]
    fn test_resize_and_release() {
        assert_eq!(
            handle_event(Event::Resize(80, 24), InputMode::Normal),
            AppAction::Resize(80, 24)
        );
        let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_event(Event::Key(release), InputMode::Normal), AppAction::None);
    }
}
