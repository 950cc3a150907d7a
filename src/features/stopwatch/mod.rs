//! Stopwatch timer.
//!
//! Provides the single active timer:
//! - Start/pause/resume/reset
//! - Drift-free elapsed time with a cancellable tick schedule
//! - Committing a finished timer into session history

pub mod engine;
pub mod format;

pub use engine::{TimerEngine, TimerEvent, TimerState};
pub use format::{format_duration, format_duration_short, format_hms};
