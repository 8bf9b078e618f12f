//! PropDesk TUI: prop-firm admin console with vim-style navigation.
//!
//! Screens:
//! 1. Home: landing page
//! 2. Console: Accounts, Payouts and Risk Alerts tables behind shared
//!    date/plan/status filters, per-view quick filters, search, sort and selection

mod admin;
mod app;
mod input;
mod loader;
mod theme;
mod ui;
mod views;

use std::fs::{self, OpenOptions};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
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
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use propdesk_core::AppConfig;

use crate::app::AppState;
use crate::loader::LoaderCommand;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("propdesk");
    let config_path = config_dir.join("config.toml");

    // A broken config file should not keep the console from starting.
    let (config, config_error) = match AppConfig::load_or_default(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config_dir, &config)?;
    info!(config = %config_path.display(), "propdesk-tui starting");
    if let Some(e) = &config_error {
        warn!(error = %e, "config unreadable, using defaults");
    }

    // Loader channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let loader_handle = loader::spawn_loader(cmd_rx, resp_tx).context("spawning loader")?;

    let mut app = AppState::new(config, cmd_tx.clone(), resp_rx);
    if let Some(e) = config_error {
        app.set_warning(format!("Config ignored: {e}"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown loader
    let _ = cmd_tx.send(LoaderCommand::Shutdown);
    let _ = loader_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("propdesk-tui stopped");
    result
}

/// Log to a file next to the config; the terminal belongs to the UI.
fn init_logging(dir: &Path, config: &AppConfig) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(&config.logging.file);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain loader responses (non-blocking)
        while let Ok(resp) = app.loader_rx.try_recv() {
            app.handle_loader_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
