//! JSON output formatting for lapse.

use serde::Serialize;
use serde_json::json;

use crate::error::LapseError;
use crate::features::history::{DayGroup, TimerSession};

/// Format a flat session list as JSON
///
/// # Errors
///
/// Returns `LapseError::Parse` if JSON serialization fails.
pub fn format_history_flat_json(sessions: &[&TimerSession]) -> Result<String, LapseError> {
    let output = json!({
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format grouped history as JSON
///
/// # Errors
///
/// Returns `LapseError::Parse` if JSON serialization fails.
pub fn format_history_grouped_json(days: &[DayGroup]) -> Result<String, LapseError> {
    let output = json!({
        "count": days.iter().map(DayGroup::session_count).sum::<usize>(),
        "days": days
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `LapseError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, LapseError> {
    Ok(serde_json::to_string_pretty(value)?)
}
