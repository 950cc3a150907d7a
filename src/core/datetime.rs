//! Date, time and duration parsing for command-line arguments.
//!
//! Accepted instants:
//! - RFC 3339 (`2024-03-01T09:30:00Z`)
//! - local date and time (`2024-03-01 09:30`, `2024-03-01 09:30:15`)
//! - local time of day on a reference date (`09:30`, `09:30:15`)
//!
//! Accepted durations: `90` (minutes), `25m`, `1h30m`, `45s`, `1h5m30s`.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LapseError;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<h>\d+)h)?(?:(?P<m>\d+)m)?(?:(?P<s>\d+)s)?$")
        .unwrap_or_else(|_| unreachable!("duration pattern is a valid regex"))
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse an instant given on the command line.
///
/// Times of day without a date are placed on `reference`.
///
/// # Errors
///
/// Returns `LapseError::Parse` if no format matches or the local time does not
/// exist (e.g. inside a DST gap).
pub fn parse_datetime(input: &str, reference: NaiveDate) -> Result<DateTime<Utc>, LapseError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(naive, input);
        }
    }

    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(input, format) {
            return local_to_utc(reference.and_time(time), input);
        }
    }

    Err(LapseError::Parse(format!(
        "Unrecognized time '{input}' (expected RFC 3339, 'YYYY-MM-DD HH:MM' or 'HH:MM')"
    )))
}

fn local_to_utc(naive: NaiveDateTime, input: &str) -> Result<DateTime<Utc>, LapseError> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| LapseError::Parse(format!("Local time '{input}' does not exist")))
}

/// Parse a duration such as `25m` or `1h30m`. A bare number means minutes.
///
/// # Errors
///
/// Returns `LapseError::Parse` for malformed, zero or out-of-range durations.
pub fn parse_duration(input: &str) -> Result<Duration, LapseError> {
    let input = input.trim().to_lowercase();
    let invalid = || LapseError::Parse(format!("Invalid duration '{input}'"));
    let too_long = || LapseError::Parse(format!("Duration '{input}' is too long"));

    if let Ok(minutes) = input.parse::<i64>() {
        if minutes <= 0 {
            return Err(invalid());
        }
        return Duration::try_minutes(minutes).ok_or_else(too_long);
    }

    let caps = DURATION_RE.captures(&input).ok_or_else(invalid)?;
    let part = |name: &str, scale: i64| -> Result<i64, LapseError> {
        caps.name(name).map_or(Ok(0), |m| {
            m.as_str()
                .parse::<i64>()
                .map_err(|_| too_long())?
                .checked_mul(scale)
                .ok_or_else(too_long)
        })
    };

    let total = [part("h", 3600)?, part("m", 60)?, part("s", 1)?]
        .into_iter()
        .try_fold(0_i64, i64::checked_add)
        .ok_or_else(too_long)?;
    if total <= 0 {
        return Err(invalid());
    }
    Duration::try_seconds(total).ok_or_else(too_long)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2024-03-01T09:30:00Z", reference()).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_local_datetime() {
        let dt = parse_datetime("2024-02-10 14:05", reference()).unwrap();
        let local = dt.with_timezone(&Local).naive_local();
        assert_eq!(local.to_string(), "2024-02-10 14:05:00");
    }

    #[test]
    fn test_parse_time_on_reference_date() {
        let dt = parse_datetime("07:15:30", reference()).unwrap();
        let local = dt.with_timezone(&Local).naive_local();
        assert_eq!(local.date(), reference());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(7, 15, 30).unwrap());
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("yesterday-ish", reference()).is_err());
        assert!(parse_datetime("25:00", reference()).is_err());
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25").unwrap(), Duration::minutes(25));
        assert_eq!(parse_duration("25m").unwrap(), Duration::minutes(25));
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("1H5M30S").unwrap(), Duration::seconds(3930));
        assert_eq!(parse_duration("45s").unwrap(), Duration::seconds(45));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("30m1h").is_err());
    }

    #[test]
    fn test_parse_duration_out_of_range() {
        for input in [
            "9223372036854775807",
            "9223372036854775807s",
            "10000000000000000h",
            "99999999999999999999m",
            "2562047788015215h30m",
        ] {
            assert!(
                matches!(parse_duration(input), Err(LapseError::Parse(_))),
                "{input} should be rejected"
            );
        }
    }
}
