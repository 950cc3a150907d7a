//! Output formatting for lapse.
//!
//! This module provides formatters for displaying sessions and settings in
//! various formats.

mod json;
mod pretty;

use chrono::Local;

use crate::cli::args::OutputFormat;
use crate::error::LapseError;
use crate::features::history::{group_sessions, TimerSession};
use crate::features::sound::Preferences;

pub use json::*;
pub use pretty::*;

/// Format session history based on output format.
///
/// `sessions` must already be ordered newest first and limited.
///
/// # Errors
///
/// Returns `LapseError::Parse` if JSON serialization fails.
pub fn format_history(
    sessions: &[&TimerSession],
    grouped: bool,
    format: OutputFormat,
) -> Result<String, LapseError> {
    if grouped {
        let days = group_sessions(sessions.iter().copied(), &Local);
        match format {
            OutputFormat::Pretty => Ok(format_history_grouped_pretty(&days)),
            OutputFormat::Json => format_history_grouped_json(&days),
        }
    } else {
        match format {
            OutputFormat::Pretty => Ok(format_history_flat_pretty(sessions)),
            OutputFormat::Json => format_history_flat_json(sessions),
        }
    }
}

/// Format a single session based on output format.
///
/// # Errors
///
/// Returns `LapseError::Parse` if JSON serialization fails.
pub fn format_session(session: &TimerSession, format: OutputFormat) -> Result<String, LapseError> {
    match format {
        OutputFormat::Pretty => Ok(format_session_pretty(session)),
        OutputFormat::Json => to_json(session),
    }
}

/// Format sound preferences based on output format.
///
/// # Errors
///
/// Returns `LapseError::Parse` if JSON serialization fails.
pub fn format_preferences(prefs: &Preferences, format: OutputFormat) -> Result<String, LapseError> {
    match format {
        OutputFormat::Pretty => Ok(format_preferences_pretty(prefs)),
        OutputFormat::Json => to_json(prefs),
    }
}
