//! The stopwatch state machine.
//!
//! Elapsed time is always recomputed from an anchor instant
//! (`elapsed = now - anchor`) rather than accumulated per tick, so late or
//! skipped ticks never introduce drift. Resuming moves the anchor forward by
//! the time spent paused.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Clock, SystemClock};
use crate::error::LapseError;
use crate::features::history::{SessionStore, TimerSession};

/// Timer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No session in progress.
    Idle,
    /// Counting.
    Running,
    /// Session in progress but not counting.
    Paused,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// Notification emitted on every engine state change.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// The timer started counting. `resumed` is false for a fresh session.
    Started {
        /// Whether this continues a paused session.
        resumed: bool,
        /// Elapsed time carried over.
        elapsed: Duration,
    },
    /// Elapsed time was recomputed.
    Tick {
        /// Current elapsed time.
        elapsed: Duration,
    },
    /// The timer stopped counting.
    Paused {
        /// Elapsed time at the moment of pausing.
        elapsed: Duration,
    },
    /// The in-progress session was discarded.
    Reset,
    /// The in-progress session was saved.
    Committed(TimerSession),
}

type Listener = Box<dyn FnMut(&TimerEvent)>;

/// A single stopwatch timer.
pub struct TimerEngine<C: Clock = SystemClock> {
    clock: C,
    tick_interval: Duration,
    elapsed: Duration,
    running: bool,
    session_start: Option<DateTime<Utc>>,
    anchor: Option<DateTime<Utc>>,
    next_tick: Option<DateTime<Utc>>,
    listeners: Vec<Listener>,
}

impl TimerEngine<SystemClock> {
    /// Create an idle engine on the system clock.
    #[must_use]
    pub fn with_system_clock(tick_interval: std::time::Duration) -> Self {
        Self::new(SystemClock, tick_interval)
    }
}

impl<C: Clock> TimerEngine<C> {
    /// Create an idle engine.
    #[must_use]
    pub fn new(clock: C, tick_interval: std::time::Duration) -> Self {
        Self {
            clock,
            tick_interval: Duration::from_std(tick_interval)
                .unwrap_or_else(|_| Duration::milliseconds(100)),
            elapsed: Duration::zero(),
            running: false,
            session_start: None,
            anchor: None,
            next_tick: None,
            listeners: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        match (self.running, self.session_start) {
            (true, _) => TimerState::Running,
            (false, Some(_)) => TimerState::Paused,
            (false, None) => TimerState::Idle,
        }
    }

    /// Elapsed time as of the last recomputation.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the timer is counting.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// When the in-progress session first started.
    #[must_use]
    pub const fn session_start(&self) -> Option<DateTime<Utc>> {
        self.session_start
    }

    /// The instant elapsed time is measured from while running.
    #[must_use]
    pub const fn anchor(&self) -> Option<DateTime<Utc>> {
        self.anchor
    }

    /// Register a callback for state changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&TimerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Start a new session or resume a paused one. No-op while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        let now = self.clock.now();
        let resumed = self.session_start.is_some();
        if !resumed {
            self.session_start = Some(now);
        }
        self.anchor = Some(now - self.elapsed);
        self.running = true;
        self.next_tick = Some(now + self.tick_interval);

        tracing::debug!(resumed, elapsed_ms = self.elapsed.num_milliseconds(), "timer started");
        self.emit(&TimerEvent::Started {
            resumed,
            elapsed: self.elapsed,
        });
    }

    /// Stop counting, keeping the session.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::InvalidState` unless the timer is running.
    pub fn pause(&mut self) -> Result<(), LapseError> {
        if !self.running {
            return Err(LapseError::InvalidState(format!(
                "cannot pause a timer that is {}",
                self.state()
            )));
        }

        self.recompute();
        self.running = false;
        self.anchor = None;
        self.next_tick = None;

        tracing::debug!(elapsed_ms = self.elapsed.num_milliseconds(), "timer paused");
        self.emit(&TimerEvent::Paused {
            elapsed: self.elapsed,
        });
        Ok(())
    }

    /// Recompute elapsed time from the anchor.
    ///
    /// Returns `false` without doing anything unless the timer is running.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.recompute();
        self.emit(&TimerEvent::Tick {
            elapsed: self.elapsed,
        });
        true
    }

    /// Time left until the next scheduled tick, or `None` when no tick is
    /// scheduled.
    #[must_use]
    pub fn time_until_tick(&self) -> Option<std::time::Duration> {
        let due = self.next_tick?;
        let remaining = due - self.clock.now();
        Some(remaining.to_std().unwrap_or(std::time::Duration::ZERO))
    }

    /// Run the scheduled tick if it is due, then schedule the next one.
    ///
    /// Returns whether a tick ran.
    pub fn poll_tick(&mut self) -> bool {
        let Some(due) = self.next_tick else {
            return false;
        };
        let now = self.clock.now();
        if now < due {
            return false;
        }

        self.next_tick = Some(now + self.tick_interval);
        self.tick()
    }

    /// Discard any in-progress session and return to idle.
    pub fn reset(&mut self) {
        self.clear();
        tracing::debug!("timer reset");
        self.emit(&TimerEvent::Reset);
    }

    /// Finalize the in-progress session, hand it to `store` and return to
    /// idle.
    ///
    /// The session starts at the first start of this timer and lasts exactly
    /// the elapsed running time, so paused intervals are excluded and
    /// `end - start` always equals the recorded duration.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::InvalidState` when idle; the engine is left
    /// untouched. Errors from the store are returned with the engine also
    /// left untouched, so the session can be retried.
    pub fn commit(
        &mut self,
        store: &mut SessionStore<'_>,
        description: Option<String>,
    ) -> Result<TimerSession, LapseError> {
        let Some(start) = self.session_start else {
            return Err(LapseError::InvalidState(
                "cannot save a timer that has not been started".to_string(),
            ));
        };

        if self.running {
            self.recompute();
        }

        let session = TimerSession::new(start, start + self.elapsed, description.unwrap_or_default())?;
        store.save(session.clone())?;

        self.clear();
        tracing::info!(id = %session.id(), duration_secs = session.duration_secs(), "timer committed");
        self.emit(&TimerEvent::Committed(session.clone()));
        Ok(session)
    }

    fn recompute(&mut self) {
        if let Some(anchor) = self.anchor {
            self.elapsed = (self.clock.now() - anchor).max(Duration::zero());
        }
    }

    fn clear(&mut self) {
        self.elapsed = Duration::zero();
        self.running = false;
        self.session_start = None;
        self.anchor = None;
        self.next_tick = None;
    }

    fn emit(&mut self, event: &TimerEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::TimeZone;

    use super::*;
    use crate::core::ManualClock;
    use crate::storage::MemoryStore;

    const TICK: std::time::Duration = std::time::Duration::from_millis(100);

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn secs(n: i64) -> Duration {
        Duration::seconds(n)
    }

    #[test]
    fn test_new_engine_is_idle() {
        let clock = ManualClock::new(t0());
        let engine = TimerEngine::new(&clock, TICK);

        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed(), Duration::zero());
        assert!(!engine.is_running());
        assert!(engine.session_start().is_none());
        assert!(engine.time_until_tick().is_none());
    }

    #[test]
    fn test_start_sets_session_start_once() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        assert_eq!(engine.state(), TimerState::Running);
        assert_eq!(engine.session_start(), Some(t0()));

        clock.advance(secs(10));
        engine.pause().unwrap();
        clock.advance(secs(10));
        engine.start();

        assert_eq!(engine.session_start(), Some(t0()));
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        clock.advance(secs(5));
        engine.start();
        engine.tick();

        assert_eq!(engine.elapsed(), secs(5));
        assert_eq!(engine.anchor(), Some(t0()));
    }

    #[test]
    fn test_tick_recomputes_from_anchor() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);
        engine.start();

        clock.advance(Duration::milliseconds(250));
        assert!(engine.tick());
        // A long stall between ticks is absorbed, not lost.
        clock.advance(secs(42));
        assert!(engine.tick());

        assert_eq!(engine.elapsed(), Duration::milliseconds(42_250));
    }

    #[test]
    fn test_tick_outside_running_is_noop() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);
        assert!(!engine.tick());

        engine.start();
        clock.advance(secs(3));
        engine.pause().unwrap();
        clock.advance(secs(3));

        assert!(!engine.tick());
        assert_eq!(engine.elapsed(), secs(3));
    }

    #[test]
    fn test_pause_resume_preserves_elapsed() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        clock.advance(secs(30));
        engine.pause().unwrap();
        assert_eq!(engine.elapsed(), secs(30));
        assert_eq!(engine.state(), TimerState::Paused);

        clock.advance(secs(15));
        engine.start();
        assert_eq!(engine.elapsed(), secs(30));
        assert_eq!(engine.anchor(), Some(t0() + secs(15)));

        clock.advance(secs(5));
        engine.tick();
        assert_eq!(engine.elapsed(), secs(35));

        engine.pause().unwrap();
        assert_eq!(engine.elapsed(), secs(35));
    }

    #[test]
    fn test_pause_when_not_running_is_rejected() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        let err = engine.pause().unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(engine.state(), TimerState::Idle);

        engine.start();
        engine.pause().unwrap();
        assert!(engine.pause().is_err());
        assert_eq!(engine.state(), TimerState::Paused);
    }

    #[test]
    fn test_reset_from_any_state_matches_fresh_engine() {
        let clock = ManualClock::new(t0());

        for steps in 0..3 {
            let mut engine = TimerEngine::new(&clock, TICK);
            if steps >= 1 {
                engine.start();
                clock.advance(secs(7));
                engine.tick();
            }
            if steps >= 2 {
                engine.pause().unwrap();
            }

            engine.reset();

            assert_eq!(engine.state(), TimerState::Idle);
            assert_eq!(engine.elapsed(), Duration::zero());
            assert!(!engine.is_running());
            assert!(engine.session_start().is_none());
            assert!(engine.anchor().is_none());
            assert!(engine.time_until_tick().is_none());
        }
    }

    #[test]
    fn test_tick_schedule_is_cancelled_on_pause_and_reset() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        assert_eq!(engine.time_until_tick(), Some(TICK));

        engine.pause().unwrap();
        assert!(engine.time_until_tick().is_none());
        clock.advance(secs(1));
        assert!(!engine.poll_tick());

        engine.start();
        engine.reset();
        clock.advance(secs(1));
        assert!(!engine.poll_tick());
        assert_eq!(engine.elapsed(), Duration::zero());
    }

    #[test]
    fn test_poll_tick_runs_when_due() {
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);
        engine.start();

        clock.advance(Duration::milliseconds(50));
        assert!(!engine.poll_tick());
        assert_eq!(engine.time_until_tick(), Some(std::time::Duration::from_millis(50)));

        clock.advance(Duration::milliseconds(50));
        assert!(engine.poll_tick());
        assert_eq!(engine.elapsed(), Duration::milliseconds(100));
        assert_eq!(engine.time_until_tick(), Some(TICK));

        // Overdue ticks report zero wait and do not queue up.
        clock.advance(secs(2));
        assert_eq!(engine.time_until_tick(), Some(std::time::Duration::ZERO));
        assert!(engine.poll_tick());
        assert!(!engine.poll_tick());
    }

    #[test]
    fn test_commit_excludes_paused_interval() {
        let storage = MemoryStore::new();
        let mut store = SessionStore::load_all(&storage);
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        clock.advance(secs(30));
        engine.pause().unwrap();
        clock.advance(secs(15));
        engine.start();
        clock.advance(secs(5));

        let session = engine.commit(&mut store, None).unwrap();

        assert_eq!(session.duration_secs(), 35.0);
        assert_eq!(session.start_time(), t0());
        assert_eq!(session.end_time() - session.start_time(), secs(35));
        assert_eq!(session.description(), "");
        assert_eq!(store.sessions(), &[session]);
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed(), Duration::zero());
    }

    #[test]
    fn test_commit_without_pause_ends_now() {
        let storage = MemoryStore::new();
        let mut store = SessionStore::load_all(&storage);
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        clock.advance(Duration::milliseconds(61_500));
        let session = engine.commit(&mut store, Some("review".to_string())).unwrap();

        assert_eq!(session.end_time(), clock.now());
        assert_eq!(session.duration_secs(), 61.5);
        assert_eq!(session.description(), "review");
    }

    #[test]
    fn test_commit_from_paused() {
        let storage = MemoryStore::new();
        let mut store = SessionStore::load_all(&storage);
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        engine.start();
        clock.advance(secs(20));
        engine.pause().unwrap();
        clock.advance(secs(600));

        let session = engine.commit(&mut store, None).unwrap();
        assert_eq!(session.duration_secs(), 20.0);
    }

    #[test]
    fn test_commit_when_idle_is_rejected() {
        let storage = MemoryStore::new();
        let mut store = SessionStore::load_all(&storage);
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        let err = engine.commit(&mut store, None).unwrap_err();
        assert!(err.is_precondition());
        assert!(store.is_empty());
    }

    #[test]
    fn test_commit_persists_across_reload() {
        let storage = MemoryStore::new();
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        let session = {
            let mut store = SessionStore::load_all(&storage);
            engine.start();
            clock.advance(secs(90));
            engine.commit(&mut store, Some("walk".to_string())).unwrap()
        };

        let reloaded = SessionStore::load_all(&storage);
        assert_eq!(reloaded.sessions(), &[session]);
    }

    #[test]
    fn test_events_are_published() {
        let storage = MemoryStore::new();
        let mut store = SessionStore::load_all(&storage);
        let clock = ManualClock::new(t0());
        let mut engine = TimerEngine::new(&clock, TICK);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        engine.start();
        clock.advance(secs(1));
        engine.tick();
        engine.pause().unwrap();
        engine.start();
        engine.reset();
        engine.start();
        clock.advance(secs(2));
        let session = engine.commit(&mut store, None).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                TimerEvent::Started { resumed: false, elapsed: Duration::zero() },
                TimerEvent::Tick { elapsed: secs(1) },
                TimerEvent::Paused { elapsed: secs(1) },
                TimerEvent::Started { resumed: true, elapsed: secs(1) },
                TimerEvent::Reset,
                TimerEvent::Started { resumed: false, elapsed: Duration::zero() },
                TimerEvent::Committed(session),
            ]
        );
    }
}
