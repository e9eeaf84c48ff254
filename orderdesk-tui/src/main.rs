//! OrderDesk TUI: record sales orders and move them from pending to executed.
//!
//! Layout:
//! 1. New Order: party/item pickers, quantity, price, live total
//! 2. Pending Orders: saved orders awaiting execution
//! 3. Executed Orders: orders moved out of pending
//!
//! Both tables are backed by spreadsheet files in the configured data
//! directory. Logs go to a file there since the terminal belongs to the UI.

mod app;
mod commands;
mod input;
mod persistence;
mod theme;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use orderdesk_core::{DeskConfig, LocalClock};

use crate::app::AppState;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Config problems are reported before the terminal is taken over.
    let config = match DeskConfig::default_path() {
        Some(path) => DeskConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DeskConfig::default(),
    };
    init_tracing(&config.log_path())?;
    info!(data_dir = %config.data_dir.display(), format = ?config.format, "starting order desk");

    let state_path = persistence::default_path();
    let persisted = persistence::load(&state_path);

    let mut app = AppState::new(
        config.catalog.clone(),
        config.sheet_store(),
        Box::new(LocalClock),
    );
    persistence::apply(&mut app, persisted);

    // A failed open leaves the store closed and raises an alert the user
    // can retry from.
    commands::reload_store(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save UI state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        warn!(error = %e, path = %state_path.display(), "failed to save ui state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("order desk closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Nothing runs in the background, so a slow tick is enough.
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
