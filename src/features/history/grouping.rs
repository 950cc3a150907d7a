//! Grouping of session history for display.
//!
//! Sessions are grouped by calendar day of their start time, then by
//! description within each day.

use chrono::{Duration, NaiveDate, TimeZone};
use serde::Serialize;

use super::session::TimerSession;

/// All sessions that started on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    /// The calendar day.
    pub date: NaiveDate,
    /// Sum of session durations, in seconds.
    pub total_seconds: f64,
    /// Groups of sessions sharing a description.
    pub descriptions: Vec<DescriptionGroup>,
}

/// Sessions on one day that share a description.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptionGroup {
    /// The shared description (may be empty).
    pub description: String,
    /// Sum of session durations, in seconds.
    pub total_seconds: f64,
    /// Sessions, newest first.
    pub sessions: Vec<TimerSession>,
}

impl DayGroup {
    /// Total duration of the day.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.descriptions
            .iter()
            .flat_map(|g| &g.sessions)
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Number of sessions on this day.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.descriptions.iter().map(|g| g.sessions.len()).sum()
    }
}

impl DescriptionGroup {
    /// Total duration of the group.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.sessions
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }
}

/// Group sessions by day (in `tz`) and description.
///
/// Days are ordered newest first. Within a day, description groups are
/// ordered by their most recent session, and sessions newest first.
pub fn group_sessions<'s, Tz, I>(sessions: I, tz: &Tz) -> Vec<DayGroup>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'s TimerSession>,
{
    let mut sorted: Vec<&TimerSession> = sessions.into_iter().collect();
    sorted.sort_by(|a, b| b.start_time().cmp(&a.start_time()));

    let mut days: Vec<DayGroup> = Vec::new();
    for session in sorted {
        let date = session.start_time().with_timezone(tz).date_naive();

        if days.last().map_or(true, |day| day.date != date) {
            days.push(DayGroup {
                date,
                total_seconds: 0.0,
                descriptions: Vec::new(),
            });
        }
        let Some(day) = days.last_mut() else {
            continue;
        };
        day.total_seconds += session.duration_secs();

        let description = session.description().trim();
        if let Some(group) = day
            .descriptions
            .iter_mut()
            .find(|g| g.description == description)
        {
            group.total_seconds += session.duration_secs();
            group.sessions.push(session.clone());
        } else {
            day.descriptions.push(DescriptionGroup {
                description: description.to_string(),
                total_seconds: session.duration_secs(),
                sessions: vec![session.clone()],
            });
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, h, m, 0).unwrap()
    }

    fn session(day: u32, h: u32, minutes: i64, description: &str) -> TimerSession {
        let start = at(day, h, 0);
        TimerSession::new(start, start + Duration::minutes(minutes), description).unwrap()
    }

    #[test]
    fn test_empty() {
        let none: Vec<TimerSession> = Vec::new();
        assert!(group_sessions(&none, &Utc).is_empty());
    }

    #[test]
    fn test_groups_by_day_then_description() {
        let sessions = vec![
            session(1, 9, 30, "reading"),
            session(2, 9, 20, "writing"),
            session(1, 11, 15, "writing"),
            session(1, 14, 10, "reading"),
            session(2, 13, 5, ""),
        ];

        let days = group_sessions(&sessions, &Utc);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let day1 = &days[1];
        assert_eq!(day1.session_count(), 3);
        assert_eq!(day1.total(), Duration::minutes(55));
        assert_eq!(day1.total_seconds, 55.0 * 60.0);

        let names: Vec<_> = day1.descriptions.iter().map(|g| g.description.as_str()).collect();
        assert_eq!(names, vec!["reading", "writing"]);
        assert_eq!(day1.descriptions[0].sessions.len(), 2);
        assert_eq!(day1.descriptions[0].total(), Duration::minutes(40));
        assert!(day1.descriptions[0].sessions[0].start_time() > day1.descriptions[0].sessions[1].start_time());

        let day2_names: Vec<_> = days[0].descriptions.iter().map(|g| g.description.as_str()).collect();
        assert_eq!(day2_names, vec!["", "writing"]);
    }

    #[test]
    fn test_descriptions_are_trimmed_for_grouping() {
        let sessions = vec![session(1, 9, 10, "focus "), session(1, 10, 10, "focus")];
        let days = group_sessions(&sessions, &Utc);
        assert_eq!(days[0].descriptions.len(), 1);
        assert_eq!(days[0].descriptions[0].sessions.len(), 2);
    }

    #[test]
    fn test_day_boundary_follows_timezone() {
        let sessions = vec![session(1, 23, 10, "late")];
        let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();

        let days = group_sessions(&sessions, &plus_two);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }
}
