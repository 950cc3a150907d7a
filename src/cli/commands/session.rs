//! Commands that create or change sessions.

use chrono::Local;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{EditArgs, LogArgs, OutputFormat};
use crate::core::{parse_datetime, parse_duration};
use crate::error::LapseError;
use crate::features::history::{SessionStore, TimerSession};
use crate::features::stopwatch::format_duration;
use crate::output::{format_session, to_json};
use crate::storage::KeyValueStore;

/// Record a session entered by hand.
///
/// # Errors
///
/// Returns `LapseError::Parse` for unreadable times and
/// `LapseError::InvalidEdit` unless the end falls after the start.
pub fn log(
    storage: &dyn KeyValueStore,
    args: LogArgs,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let today = Local::now().date_naive();
    let start = parse_datetime(&args.start, today)?;

    let end = match (&args.end, &args.duration) {
        (Some(end), _) => parse_datetime(end, today)?,
        (None, Some(duration)) => start
            .checked_add_signed(parse_duration(duration)?)
            .ok_or_else(|| LapseError::Parse(format!("Duration '{duration}' is too long")))?,
        (None, None) => {
            return Err(LapseError::Parse(
                "Either --end or --duration is required".to_string(),
            ))
        }
    };

    let session = TimerSession::manual(start, end, args.description.unwrap_or_default())?;
    let mut store = SessionStore::load_all(storage);
    store.save(session.clone())?;

    match format {
        OutputFormat::Json => to_json(&session),
        OutputFormat::Pretty => Ok(format!(
            "{} Logged {} ({})",
            "✓".green(),
            format_duration(session.duration()),
            session.short_id().dimmed()
        )),
    }
}

/// Edit the times or description of a stored session.
///
/// # Errors
///
/// Returns `LapseError::NotFound` for unknown ids and
/// `LapseError::InvalidEdit` if the edited times are not ordered.
pub fn edit(
    storage: &dyn KeyValueStore,
    args: EditArgs,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let mut store = SessionStore::load_all(storage);
    let current = store.find(&args.id)?.clone();

    if args.start.is_none() && args.end.is_none() && args.description.is_none() {
        return Err(LapseError::Parse(
            "Nothing to change (use --start, --end or --description)".to_string(),
        ));
    }

    let reference = current.start_local().date_naive();
    let start = args
        .start
        .as_deref()
        .map(|s| parse_datetime(s, reference))
        .transpose()?;
    let end = args
        .end
        .as_deref()
        .map(|s| parse_datetime(s, reference))
        .transpose()?;

    let edited = current.edited(start, end, args.description)?;
    store.update(edited.clone())?;

    match format {
        OutputFormat::Json => to_json(&edited),
        OutputFormat::Pretty => Ok(format!(
            "{} Updated session\n\n{}",
            "✓".green(),
            format_session(&edited, format)?
        )),
    }
}

/// Delete one session.
///
/// # Errors
///
/// Returns `LapseError::NotFound` if no session matches.
pub fn delete(
    storage: &dyn KeyValueStore,
    id: &str,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let mut store = SessionStore::load_all(storage);
    let target = store.find(id)?.id();
    store.delete(target);

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": target })),
        OutputFormat::Pretty => Ok(format!("{} Deleted session {}", "✓".green(), target)),
    }
}

/// Delete every session. Requires `--force`.
///
/// # Errors
///
/// Returns `LapseError::InvalidState` without `--force`.
pub fn clear(
    storage: &dyn KeyValueStore,
    force: bool,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let mut store = SessionStore::load_all(storage);
    let count = store.len();

    if !force {
        return Err(LapseError::InvalidState(format!(
            "This will delete {count} session(s).\nUse --force to confirm."
        )));
    }

    store.clear_all();

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": count })),
        OutputFormat::Pretty => Ok(format!("{} Cleared {count} session(s)", "✓".green())),
    }
}
