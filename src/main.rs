//! ReelTUI - Neon TUI for discovering movies
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! reeltui
//!
//! # CLI mode (for automation)
//! reeltui search "blade runner"
//! reeltui info 78 --json
//! reeltui trending
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use reeltui::app::{App, Response};
use reeltui::cli::{Cli, ExitCode, Output};
use reeltui::config::Config;
use reeltui::worker::Worker;
use reeltui::{commands, logging, ui, TmdbClient};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Event loop tick: input poll timeout and debounce resolution
const TICK_RATE: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let output = Output::new(&cli);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return output.error(e.to_string(), ExitCode::from(&e)).into(),
    };
    logging::init(&config);

    match cli.command {
        // CLI mode: execute command and exit
        Some(command) => commands::run(command, &config, &output).await.into(),
        // TUI mode: launch interactive interface
        None => match run_tui(&config).await {
            Ok(()) => ExitCode::Success.into(),
            Err(e) => {
                tracing::error!(error = %e, "tui exited with error");
                let code = e
                    .downcast_ref::<reeltui::ConfigError>()
                    .map(ExitCode::from)
                    .unwrap_or(ExitCode::Error);
                output.error(format!("{:#}", e), code).into()
            }
        },
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
///
/// The credential is checked before the terminal is taken over, so a missing
/// token is reported once on a normal screen.
async fn run_tui(config: &Config) -> Result<()> {
    let token = config.tmdb_token()?;
    let tmdb = Arc::new(TmdbClient::with_base_url(token, config.tmdb_base_url()));
    let store = match config.open_store() {
        Ok(store) => {
            tracing::info!(store = store.backend_name(), "starting tui");
            Some(Arc::new(store))
        }
        Err(e) => {
            // Runs without the trending strip and search recording
            tracing::warn!(error = %e, "trending store unavailable, continuing without it");
            None
        }
    };

    let (worker, responses) = Worker::new(tmdb, store);
    let mut app = App::with_settings(config.app_settings());

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &worker, responses).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;
    tracing::info!("tui stopped");

    result
}

/// Main event loop - handles input, applies responses, drives timers, renders
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    worker: &Worker,
    mut responses: UnboundedReceiver<Response>,
) -> Result<()> {
    while app.running {
        for request in app.take_requests() {
            worker.dispatch(request);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Blocking poll; the worker tasks run on the runtime's other threads
        if tokio::task::block_in_place(|| event::poll(TICK_RATE))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(response) = responses.try_recv() {
            app.apply(response);
        }

        app.tick(Instant::now());
    }

    Ok(())
}
