//! jsonl-core - Core types and decoding for the JSONL transcript viewer
//!
//! This crate provides the data model for line-delimited JSON transcripts,
//! the decoders that turn a file into pretty-printed JSON text or typed
//! messages, and discovery of candidate files on disk.

pub mod discovery;
pub mod error;
pub mod parser;
pub mod preview;
pub mod types;

pub use discovery::*;
pub use error::*;
pub use parser::*;
pub use preview::*;
pub use types::*;
