//! Anchor timestamps the page widgets count against.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("invalid anchor timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}

/// A point in time a widget measures against.
///
/// Fixed anchors are absolute instants (message/event dates). Recurring
/// anchors are yearly calendar dates (birthdays) that need a next-occurrence
/// derivation. Immutable once configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAnchor {
    Fixed(DateTime<Utc>),
    Recurring(NaiveDate),
}

/// Parse an ISO-8601 timestamp with offset into a UTC instant.
pub fn parse_instant(timestamp: &str) -> Result<DateTime<Utc>, AnchorError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| AnchorError::InvalidTimestamp(timestamp.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(date: &str) -> Result<NaiveDate, AnchorError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AnchorError::InvalidDate(date.to_string()))
}

impl TimeAnchor {
    /// Parse a fixed anchor from an ISO-8601 timestamp with offset.
    pub fn fixed(timestamp: &str) -> Result<Self, AnchorError> {
        parse_instant(timestamp).map(Self::Fixed)
    }

    /// Parse a recurring anchor from a `YYYY-MM-DD` calendar date.
    pub fn recurring(date: &str) -> Result<Self, AnchorError> {
        parse_calendar_date(date).map(Self::Recurring)
    }

    /// The next instant this anchor refers to, as of `now`.
    ///
    /// Fixed anchors are their own occurrence. For recurring anchors the
    /// candidate is the anchor's month/day in the current year at UTC
    /// midnight; if that lies strictly before `now`, the year advances by
    /// one.
    pub fn next_occurrence(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Self::Fixed(instant) => instant,
            Self::Recurring(date) => {
                let year = now.year();
                let candidate = midnight_utc(on_year(date, year));
                if candidate < now {
                    midnight_utc(on_year(date, year + 1))
                } else {
                    candidate
                }
            }
        }
    }
}

/// The anchor's month/day placed in `year`. A Feb 29 anchor rolls to Mar 1
/// in non-leap years.
fn on_year(date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 3, 1).expect("March 1st is always valid"))
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is valid for every date")
        .and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_fixed_anchor_parses_offset() {
        let anchor = TimeAnchor::fixed("2025-04-18T03:35:00+03:00").unwrap();
        assert_eq!(
            anchor,
            TimeAnchor::Fixed(instant("2025-04-18T00:35:00Z"))
        );
    }

    #[test]
    fn test_fixed_anchor_rejects_garbage() {
        assert!(TimeAnchor::fixed("not a date").is_err());
        assert!(TimeAnchor::fixed("2025-04-18").is_err());
    }

    #[test]
    fn test_recurring_anchor_parses_calendar_date() {
        let anchor = TimeAnchor::recurring("2002-11-14").unwrap();
        assert_eq!(
            anchor,
            TimeAnchor::Recurring(NaiveDate::from_ymd_opt(2002, 11, 14).unwrap())
        );
    }

    #[test]
    fn test_recurring_anchor_rejects_garbage() {
        assert!(TimeAnchor::recurring("14/11/2002").is_err());
        assert!(TimeAnchor::recurring("2002-13-40").is_err());
    }

    #[test]
    fn test_next_occurrence_before_date_stays_in_current_year() {
        let anchor = TimeAnchor::recurring("2002-11-14").unwrap();
        let now = instant("2025-06-01T12:00:00Z");
        assert_eq!(anchor.next_occurrence(now), instant("2025-11-14T00:00:00Z"));
    }

    #[test]
    fn test_next_occurrence_after_date_advances_a_year() {
        let anchor = TimeAnchor::recurring("2002-11-14").unwrap();
        let now = instant("2025-11-20T12:00:00Z");
        assert_eq!(anchor.next_occurrence(now), instant("2026-11-14T00:00:00Z"));
    }

    #[test]
    fn test_next_occurrence_later_the_same_day_advances_a_year() {
        // Strictly-before comparison: by noon on the day itself, midnight has
        // already passed.
        let anchor = TimeAnchor::recurring("2002-11-14").unwrap();
        let now = instant("2025-11-14T12:00:00Z");
        assert_eq!(anchor.next_occurrence(now), instant("2026-11-14T00:00:00Z"));
    }

    #[test]
    fn test_next_occurrence_of_fixed_anchor_is_itself() {
        let anchor = TimeAnchor::fixed("2025-05-08T15:31:00+03:00").unwrap();
        let now = instant("2030-01-01T00:00:00Z");
        assert_eq!(anchor.next_occurrence(now), instant("2025-05-08T12:31:00Z"));
    }

    #[test]
    fn test_leap_day_anchor_rolls_to_march_first() {
        let anchor = TimeAnchor::recurring("2000-02-29").unwrap();
        let now = instant("2025-01-10T00:00:00Z");
        assert_eq!(anchor.next_occurrence(now), instant("2025-03-01T00:00:00Z"));
    }
}
