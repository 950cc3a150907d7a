//! Completed timer sessions.

use chrono::{DateTime, Duration, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LapseError;

/// A completed timer interval.
///
/// Fields are private so `duration` can only ever be derived from the two
/// timestamps. Timestamps are kept at millisecond precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionRecord")]
pub struct TimerSession {
    id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    /// Seconds between `start_time` and `end_time`.
    duration: f64,
    description: String,
}

/// Unvalidated wire form of a session. The stored `duration` is ignored
/// and recomputed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    #[serde(default)]
    description: String,
}

impl TryFrom<SessionRecord> for TimerSession {
    type Error = LapseError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        Self::build(record.id, record.start_time, record.end_time, record.description)
    }
}

impl TimerSession {
    /// Create a session from a finished timer. `end` may equal `start`.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::InvalidEdit` if `end` precedes `start`.
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Result<Self, LapseError> {
        Self::build(Uuid::new_v4(), start, end, description.into())
    }

    /// Create a session entered by hand. `end` must be strictly after `start`.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::InvalidEdit` unless `end > start`.
    pub fn manual(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Result<Self, LapseError> {
        ensure_positive(start, end)?;
        Self::new(start, end, description)
    }

    fn build(
        id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: String,
    ) -> Result<Self, LapseError> {
        let start_time = start.trunc_subsecs(3);
        let end_time = end.trunc_subsecs(3);
        if end_time < start_time {
            return Err(LapseError::InvalidEdit(format!(
                "end time {end_time} is before start time {start_time}"
            )));
        }

        let mut session = Self {
            id,
            start_time,
            end_time,
            duration: 0.0,
            description,
        };
        session.recompute();
        Ok(session)
    }

    /// Apply a manual edit, returning the edited copy. The id is preserved.
    ///
    /// When either timestamp changes, the result must satisfy `end > start`.
    /// A description-only edit never touches the times.
    ///
    /// # Errors
    ///
    /// Returns `LapseError::InvalidEdit` if the edited times are not ordered.
    pub fn edited(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        description: Option<String>,
    ) -> Result<Self, LapseError> {
        let times_changed = start.is_some() || end.is_some();
        let start = start.unwrap_or(self.start_time);
        let end = end.unwrap_or(self.end_time);
        if times_changed {
            ensure_positive(start, end)?;
        }

        Self::build(
            self.id,
            start,
            end,
            description.unwrap_or_else(|| self.description.clone()),
        )
    }

    fn recompute(&mut self) {
        self.duration = seconds_between(self.start_time, self.end_time);
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// First eight characters of the id, for display.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// When the session started.
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// When the session ended.
    #[must_use]
    pub const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Duration in seconds.
    #[must_use]
    pub const fn duration_secs(&self) -> f64 {
        self.duration
    }

    /// Duration as a `chrono::Duration`.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Free-text description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Start time in the local timezone.
    #[must_use]
    pub fn start_local(&self) -> DateTime<Local> {
        self.start_time.with_timezone(&Local)
    }

    /// End time in the local timezone.
    #[must_use]
    pub fn end_local(&self) -> DateTime<Local> {
        self.end_time.with_timezone(&Local)
    }
}

fn ensure_positive(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), LapseError> {
    if end.trunc_subsecs(3) <= start.trunc_subsecs(3) {
        return Err(LapseError::InvalidEdit(
            "end time must be after start time".to_string(),
        ));
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}
