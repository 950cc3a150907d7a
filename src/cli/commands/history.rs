//! History listing commands.

use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::error::LapseError;
use crate::features::history::SessionStore;
use crate::output::{format_history, format_session};
use crate::storage::KeyValueStore;

/// List sessions, newest first, grouped unless `--flat` is given.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn history(
    storage: &dyn KeyValueStore,
    args: &HistoryArgs,
    default_limit: usize,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let store = SessionStore::load_all(storage);
    let limit = args.limit.unwrap_or(default_limit);

    let sessions: Vec<_> = store.newest_first().into_iter().take(limit).collect();
    format_history(&sessions, !args.flat, format)
}

/// Show a single session by id or id prefix.
///
/// # Errors
///
/// Returns `LapseError::NotFound` if no session matches.
pub fn show(
    storage: &dyn KeyValueStore,
    id: &str,
    format: OutputFormat,
) -> Result<String, LapseError> {
    let store = SessionStore::load_all(storage);
    let session = store.find(id)?;
    format_session(session, format)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::features::history::TimerSession;
    use crate::storage::MemoryStore;

    fn seeded(storage: &MemoryStore, count: i64) -> Vec<TimerSession> {
        let mut store = SessionStore::load_all(storage);
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                let start = base + Duration::hours(i);
                let session =
                    TimerSession::new(start, start + Duration::minutes(10), format!("s{i}")).unwrap();
                store.save(session.clone()).unwrap();
                session
            })
            .collect()
    }

    #[test]
    fn test_history_respects_limit() {
        let storage = MemoryStore::new();
        seeded(&storage, 5);

        let args = HistoryArgs {
            limit: Some(2),
            flat: true,
        };
        let out = history(&storage, &args, 20, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["items"][0]["description"], "s4");
        assert_eq!(value["items"][1]["description"], "s3");
    }

    #[test]
    fn test_history_default_limit() {
        let storage = MemoryStore::new();
        seeded(&storage, 3);

        let args = HistoryArgs {
            limit: None,
            flat: false,
        };
        let out = history(&storage, &args, 1, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
    }

    #[test]
    fn test_show_by_prefix() {
        let storage = MemoryStore::new();
        let sessions = seeded(&storage, 1);
        let prefix = sessions[0].short_id();

        let out = show(&storage, &prefix, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], sessions[0].id().to_string());
    }

    #[test]
    fn test_show_missing() {
        let storage = MemoryStore::new();
        let err = show(&storage, "deadbeef", OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, LapseError::NotFound(_)));
    }
}
