//! pixide - a small terminal text editor

mod app;
mod clipboard;
mod grid;
mod logging;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use app::App;
use clap::Parser;
use clipboard::SystemClipboard;
use directories::ProjectDirs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the file to edit
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Editor settings (JSON); defaults to config.json in the config directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_guard = logging::init();

    // Config errors are reported before the terminal is taken over
    let config_path = args.config.or_else(|| {
        ProjectDirs::from("com", "pixide", "pixide")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    });
    let config = match &config_path {
        Some(path) => app::load_config(path)?,
        None => Default::default(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (cols, rows) = terminal::size()?;
    let mut app = App::new(
        args.file,
        config,
        Box::new(SystemClipboard::new()),
        cols,
        rows,
    );

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "editor loop failed");
        eprintln!("Error: {err:?}");
        if let Some(guard) = &log_guard {
            eprintln!("Logs: {}", guard.log_dir().display());
        }
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
            if app.should_quit {
                return Ok(());
            }
        }
        app.clear_status_if_expired();
    }
}
