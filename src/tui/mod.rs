//! Terminal User Interface (TUI) for lapse.
//!
//! Tabbed timer, history and settings views. Built with ratatui and crossterm.
//!
//! The loop sleeps in `event::poll` until either input arrives or the engine's
//! next tick is due, so the readout refreshes at the configured tick interval
//! while running and the process idles otherwise.

mod app;
mod event;
mod ui;

pub use app::{App, Input, SettingsRow, Tab};

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::core::Clock;
use crate::error::LapseError;
use crate::features::stopwatch::TimerEngine;
use crate::storage::KeyValueStore;

/// Poll timeout while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(storage: &dyn KeyValueStore, config: &Config) -> Result<(), LapseError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| LapseError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| LapseError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| LapseError::Terminal(format!("Failed to create terminal: {e}")))?;

    // Create app state and run main loop
    let engine = TimerEngine::with_system_clock(config.timer.tick_interval());
    let mut app = App::new(storage, engine);
    tracing::info!(sessions = app.store.len(), "tui started");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if app.engine.session_start().is_some() {
        tracing::warn!(elapsed = %app.engine.elapsed(), "unsaved session discarded on exit");
    }
    result
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, C>,
) -> Result<(), LapseError> {
    loop {
        app.engine.poll_tick();

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| LapseError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.engine.time_until_tick().unwrap_or(IDLE_POLL);
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => break,
            }
        }
    }

    Ok(())
}
