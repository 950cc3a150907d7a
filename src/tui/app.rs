//! Application state for the TUI.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use uuid::Uuid;

use crate::core::{Clock, SystemClock};
use crate::features::history::{group_sessions, DayGroup, SessionStore, TimerSession};
use crate::features::sound::{AudioCue, Preferences};
use crate::features::stopwatch::{format_hms, TimerEngine, TimerState};
use crate::storage::KeyValueStore;

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Stopwatch readout and controls.
    Timer,
    /// Stored sessions, grouped by day.
    History,
    /// Sound choices.
    Settings,
}

impl Tab {
    /// Tabs in display order.
    pub const ALL: [Self; 3] = [Self::Timer, Self::History, Self::Settings];

    /// Label shown in the tab bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Timer => "Timer",
            Self::History => "History",
            Self::Settings => "Settings",
        }
    }

    /// Position in [`Tab::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Timer => 0,
            Self::History => 1,
            Self::Settings => 2,
        }
    }

    /// The tab to the right, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Timer => Self::History,
            Self::History => Self::Settings,
            Self::Settings => Self::Timer,
        }
    }
}

/// Rows on the settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    /// Background sound.
    Audio,
    /// When the sound fades out.
    Fadeout,
}

/// Text being typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Description for the session about to be saved.
    SaveDescription(String),
    /// New description for a stored session.
    EditDescription {
        /// Session being edited.
        id: Uuid,
        /// Text typed so far.
        buffer: String,
    },
}

impl Input {
    /// The text typed so far.
    #[must_use]
    pub fn buffer(&self) -> &str {
        match self {
            Self::SaveDescription(buffer) | Self::EditDescription { buffer, .. } => buffer,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self {
            Self::SaveDescription(buffer) | Self::EditDescription { buffer, .. } => buffer,
        }
    }
}

/// Application state.
pub struct App<'a, C: Clock = SystemClock> {
    storage: &'a dyn KeyValueStore,
    /// The running stopwatch.
    pub engine: TimerEngine<C>,
    /// Stored sessions.
    pub store: SessionStore<'a>,
    /// Sound settings.
    pub prefs: Preferences,
    /// Playback cue driven by engine events.
    pub cue: Rc<RefCell<AudioCue>>,
    /// Active view.
    pub tab: Tab,
    /// Index into [`App::history_sessions`].
    pub history_selected: usize,
    /// Focused settings row.
    pub settings_row: SettingsRow,
    /// Open prompt, if any.
    pub input: Option<Input>,
    /// Status message to display.
    pub status: Option<String>,
}

impl<'a, C: Clock> App<'a, C> {
    /// Create the app around an idle engine.
    pub fn new(storage: &'a dyn KeyValueStore, mut engine: TimerEngine<C>) -> Self {
        let prefs = Preferences::load(storage);
        let cue = Rc::new(RefCell::new(AudioCue::new(prefs)));

        let listener = Rc::clone(&cue);
        engine.subscribe(move |event| listener.borrow_mut().handle(event));

        Self {
            storage,
            engine,
            store: SessionStore::load_all(storage),
            prefs,
            cue,
            tab: Tab::Timer,
            history_selected: 0,
            settings_row: SettingsRow::Audio,
            input: None,
            status: Some("space:start/pause | s:save | r:reset | ?:help".to_string()),
        }
    }

    /// Elapsed time as `HH:MM:SS`.
    #[must_use]
    pub fn readout(&self) -> String {
        format_hms(self.engine.elapsed())
    }

    /// Start, resume or pause the timer.
    pub fn toggle_timer(&mut self) {
        self.status = None;
        if self.engine.is_running() {
            if let Err(e) = self.engine.pause() {
                self.status = Some(e.to_string());
            }
        } else {
            self.engine.start();
        }
    }

    /// Open the save prompt. Does nothing while idle.
    pub fn begin_save(&mut self) {
        if self.engine.state() == TimerState::Idle {
            self.status = Some("Nothing to save".to_string());
            return;
        }
        self.input = Some(Input::SaveDescription(String::new()));
    }

    /// Discard the in-progress session.
    pub fn reset_timer(&mut self) {
        if self.engine.state() != TimerState::Idle {
            self.engine.reset();
            self.status = Some("Timer reset".to_string());
        }
    }

    /// Open the description prompt for the selected session.
    pub fn begin_edit(&mut self) {
        if let Some(session) = self.selected_session() {
            self.input = Some(Input::EditDescription {
                id: session.id(),
                buffer: session.description().to_string(),
            });
        }
    }

    /// Append a character to the prompt.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = &mut self.input {
            input.buffer_mut().push(c);
        }
    }

    /// Remove the last character from the prompt.
    pub fn input_backspace(&mut self) {
        if let Some(input) = &mut self.input {
            input.buffer_mut().pop();
        }
    }

    /// Close the prompt without applying it.
    pub fn cancel_input(&mut self) {
        self.input = None;
    }

    /// Apply the prompt.
    pub fn submit_input(&mut self) {
        match self.input.take() {
            Some(Input::SaveDescription(description)) => self.commit(description),
            Some(Input::EditDescription { id, buffer }) => self.edit_description(id, buffer),
            None => {}
        }
    }

    fn commit(&mut self, description: String) {
        let description = Some(description.trim().to_string()).filter(|d| !d.is_empty());
        self.status = Some(match self.engine.commit(&mut self.store, description) {
            Ok(session) => format!("Saved {}", format_hms(session.duration())),
            Err(e) => {
                if !e.is_precondition() {
                    tracing::error!(error = %e, "failed to save session");
                }
                e.to_string()
            }
        });
    }

    fn edit_description(&mut self, id: Uuid, description: String) {
        let Some(current) = self.store.get(id) else {
            self.status = Some(format!("Session {id} no longer exists"));
            return;
        };

        let result = current
            .edited(None, None, Some(description.trim().to_string()))
            .and_then(|edited| self.store.update(edited));

        self.status = Some(match result {
            Ok(()) => "Description updated".to_string(),
            Err(e) => e.to_string(),
        });
    }

    /// History grouped for display.
    #[must_use]
    pub fn history_groups(&self) -> Vec<DayGroup> {
        group_sessions(self.store.sessions(), &Local)
    }

    /// Sessions in the order the history tab lists them.
    #[must_use]
    pub fn history_sessions(&self) -> Vec<TimerSession> {
        self.history_groups()
            .into_iter()
            .flat_map(|day| day.descriptions)
            .flat_map(|group| group.sessions)
            .collect()
    }

    /// The highlighted history entry.
    #[must_use]
    pub fn selected_session(&self) -> Option<TimerSession> {
        self.history_sessions().into_iter().nth(self.history_selected)
    }

    /// Delete the highlighted history entry.
    pub fn delete_selected(&mut self) {
        if let Some(session) = self.selected_session() {
            if self.store.delete(session.id()) {
                self.status = Some(format!("Deleted {}", session.short_id()));
            }
            self.clamp_selection();
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        match self.tab {
            Tab::History => {
                if self.history_selected + 1 < self.store.len() {
                    self.history_selected += 1;
                }
            }
            Tab::Settings => self.settings_row = SettingsRow::Fadeout,
            Tab::Timer => {}
        }
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        match self.tab {
            Tab::History => self.history_selected = self.history_selected.saturating_sub(1),
            Tab::Settings => self.settings_row = SettingsRow::Audio,
            Tab::Timer => {}
        }
    }

    /// Cycle the focused setting forward or backward and save it.
    pub fn cycle_setting(&mut self, forward: bool) {
        match (self.settings_row, forward) {
            (SettingsRow::Audio, true) => self.prefs.audio = self.prefs.audio.next(),
            (SettingsRow::Audio, false) => self.prefs.audio = self.prefs.audio.previous(),
            (SettingsRow::Fadeout, true) => self.prefs.fadeout = self.prefs.fadeout.next(),
            (SettingsRow::Fadeout, false) => self.prefs.fadeout = self.prefs.fadeout.previous(),
        }

        self.cue.borrow_mut().set_preferences(self.prefs);
        self.status = Some(match self.prefs.save(self.storage) {
            Ok(()) => "Settings saved".to_string(),
            Err(e) => e.to_string(),
        });
    }

    /// Switch to a tab.
    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.history_selected = 0;
        } else if self.history_selected >= len {
            self.history_selected = len - 1;
        }
    }
}
