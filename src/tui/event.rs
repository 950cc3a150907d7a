//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Clock;
use crate::error::LapseError;
use crate::tui::app::{App, Tab};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
}

/// Wait up to `timeout` for terminal input and apply it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<C: Clock>(
    app: &mut App<'_, C>,
    timeout: Duration,
) -> Result<Option<Action>, LapseError> {
    if event::poll(timeout).map_err(|e| LapseError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| LapseError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Apply one key press.
pub fn handle_key<C: Clock>(app: &mut App<'_, C>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.input.is_some() {
        match key.code {
            KeyCode::Enter => app.submit_input(),
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),

        KeyCode::Tab => app.set_tab(app.tab.next()),
        KeyCode::Char('1') => app.set_tab(Tab::Timer),
        KeyCode::Char('2') => app.set_tab(Tab::History),
        KeyCode::Char('3') => app.set_tab(Tab::Settings),

        // Timer controls work from every tab
        KeyCode::Char(' ') => app.toggle_timer(),
        KeyCode::Char('s') => app.begin_save(),
        KeyCode::Char('r') => app.reset_timer(),

        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        KeyCode::Char('d') if app.tab == Tab::History => app.delete_selected(),
        KeyCode::Char('e') | KeyCode::Enter if app.tab == Tab::History => app.begin_edit(),

        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter if app.tab == Tab::Settings => {
            app.cycle_setting(true);
        }
        KeyCode::Char('h') | KeyCode::Left if app.tab == Tab::Settings => {
            app.cycle_setting(false);
        }

        KeyCode::Char('?') => {
            app.status = Some(
                "space:start/pause | s:save | r:reset | tab/1-3:view | j/k:nav | d:delete | e:edit | h/l:change | q:quit"
                    .to_string(),
            );
        }

        _ => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    use super::*;
    use crate::core::ManualClock;
    use crate::features::stopwatch::{TimerEngine, TimerState};
    use crate::storage::MemoryStore;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_timer_keys() {
        let storage = MemoryStore::new();
        let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
        let mut app = App::new(
            &storage,
            TimerEngine::new(Rc::clone(&clock), Duration::from_millis(100)),
        );

        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert_eq!(app.engine.state(), TimerState::Running);

        clock.advance(ChronoDuration::seconds(10));
        handle_key(&mut app, press(KeyCode::Char('s')));
        // Typing inside the prompt must not trigger timer keys
        handle_key(&mut app, press(KeyCode::Char('r')));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.input.as_ref().map(|i| i.buffer()), Some("rq"));

        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), None);
        assert_eq!(app.store.sessions()[0].description(), "rq");
        assert_eq!(app.engine.state(), TimerState::Idle);
    }

    #[test]
    fn test_tabs_and_quit() {
        let storage = MemoryStore::new();
        let clock = Rc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
        let mut app = App::new(
            &storage,
            TimerEngine::new(Rc::clone(&clock), Duration::from_millis(100)),
        );

        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.tab, Tab::Settings);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.tab, Tab::Timer);

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
