//! jsonl-view - Interactive terminal viewer for JSONL transcripts

mod cli;

use std::fs::File;
use std::io::{self, stdout, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use jsonl_core::{file_entry, find_jsonl_files, resolve_history_dir, FileEntry};
use jsonl_ui::{ansi, components::draw, event::handle_event, App, AppAction, Flow};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut app = build_app(&cli)?;

    // Screenshot mode: render one frame and exit
    if cli.screenshot {
        app.resize(cli.width, cli.height);
        return run_screenshot(&app, cli.width, cli.height);
    }

    run_tui(app)
}

/// Send logs to `log_file`, or discard them; the terminal belongs to the UI
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

/// Resolve what to show: a directory listing, or one file opened directly
fn build_app(cli: &Cli) -> Result<App> {
    let mode = cli.view_mode();

    if let Some(path) = cli.path.as_deref().filter(|p| p.is_file()) {
        let entry = file_entry(path).context("Failed to open file")?;
        let mut app = App::new(vec![entry], None, mode);
        app.open_selected();
        return Ok(app);
    }

    let (files, project) = match cli.path.as_deref() {
        Some(dir) => (list_files(dir)?, None),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            let history = resolve_history_dir(&cwd).context("Failed to resolve directory")?;
            (list_files(&history.search_dir)?, history.project)
        }
    };

    Ok(App::new(files, project, mode))
}

fn list_files(dir: &Path) -> Result<Vec<FileEntry>> {
    let files = find_jsonl_files(dir).context("Failed to find JSONL files")?;
    info!(dir = %dir.display(), count = files.len(), "listing files");
    Ok(files)
}

/// Run the TUI application
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Cleanup, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    loop {
        terminal
            .draw(|frame| draw(frame, app))
            .context("Failed to draw frame")?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        let action = handle_event(event::read()?, app.input_mode());
        if action == AppAction::Redraw {
            terminal.clear()?;
        }
        if app.handle_action(action) == Flow::Quit {
            break;
        }
    }

    Ok(())
}

/// Run screenshot mode: render one frame and output to stdout
fn run_screenshot(app: &App, width: u16, height: u16) -> Result<()> {
    use ratatui::backend::TestBackend;

    // Create a test backend with the specified size
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    // Render one frame
    terminal.draw(|frame| draw(frame, app))?;

    let buffer = terminal.backend().buffer();

    // Output each cell with ANSI styling
    let mut output = String::new();
    let mut last_style: Option<Style> = None;

    for y in 0..height {
        for x in 0..width {
            let Some(cell) = buffer.cell((x, y)) else {
                continue;
            };
            let style = cell.style();

            // Only emit style codes when style changes
            if last_style != Some(style) {
                output.push_str(ansi::RESET);
                output.push_str(&ansi::sgr(style));
                last_style = Some(style);
            }

            output.push_str(cell.symbol());
        }
        output.push_str(ansi::RESET);
        output.push('\n');
        last_style = None;
    }

    let mut out = io::stdout();
    out.write_all(output.as_bytes())?;
    out.flush()?;

    Ok(())
}
