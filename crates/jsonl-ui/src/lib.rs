//! jsonl-ui - Rendering engine and TUI components for the JSONL viewer
//!
//! ANSI-aware text primitives, JSON highlighting, search overlay, viewport
//! navigation and message rendering, plus the screen controller and the
//! ratatui components that compose a frame.

pub mod ansi;
pub mod app;
pub mod components;
pub mod event;
pub mod highlight;
pub mod markdown;
pub mod message;
pub mod search;
pub mod theme;
pub mod viewport;

pub use app::*;
pub use event::*;
pub use theme::Theme;
