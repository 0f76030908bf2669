//! CLI argument parsing

use std::path::PathBuf;

use clap::Parser;
use jsonl_core::ViewMode;

/// Interactive viewer for line-delimited JSON transcripts
#[derive(Parser, Debug)]
#[command(name = "jsonl-view")]
#[command(version)]
#[command(about = "Browse JSONL transcripts as highlighted JSON or as messages")]
pub struct Cli {
    /// Directory to browse, or a .jsonl file to open directly
    ///
    /// Without it, the Claude history directory for the current
    /// directory is used when one exists, else the current directory.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Initial view mode when a file is opened (1=json, 2=messages)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub mode: u8,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, env = "JSONL_VIEW_LOG")]
    pub log_file: Option<PathBuf>,

    /// Screenshot mode: render one frame and exit
    #[arg(long)]
    pub screenshot: bool,

    /// Screenshot width (default: 120)
    #[arg(long, default_value = "120")]
    pub width: u16,

    /// Screenshot height (default: 40)
    #[arg(long, default_value = "40")]
    pub height: u16,
}

impl Cli {
    /// Get the initial view mode
    pub fn view_mode(&self) -> ViewMode {
        char::from_digit(u32::from(self.mode), 10)
            .and_then(ViewMode::from_key)
            .unwrap_or_default()
    }
}
