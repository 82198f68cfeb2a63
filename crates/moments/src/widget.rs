//! Pure per-tick frame computation for the page widgets.
//!
//! Widgets are pure functions of `(now, anchor)`; the ticker owns the
//! side-effecting render loop. Keeping the two apart makes the breakdown
//! math testable without any scheduling.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::age::AgeBreakdown;
use crate::anchor::TimeAnchor;
use crate::breakdown::DurationBreakdown;

/// The rendered state of one widget at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WidgetFrame {
    /// Elapsed or remaining time.
    Counting { breakdown: DurationBreakdown },
    /// The target of an elapsed widget still lies in the future.
    Waiting,
    /// A recurring anchor has been reached; carries the refreshed age.
    Celebrating { age: AgeBreakdown },
    /// The anchor string could not be parsed at setup.
    Invalid,
}

pub trait Widget: Send + Sync {
    fn id(&self) -> &str;

    fn frame(&self, now: DateTime<Utc>) -> WidgetFrame;
}

/// Counts up from a fixed instant in the past.
pub struct ElapsedWidget {
    id: String,
    target: DateTime<Utc>,
}

impl ElapsedWidget {
    /// Build from an ISO-8601 anchor string. An unparseable anchor is an
    /// error here, so no widget (and no ticker) ever exists for it.
    pub fn new(id: impl Into<String>, anchor: &str) -> Result<Self, crate::anchor::AnchorError> {
        let target = crate::anchor::parse_instant(anchor)?;
        Ok(Self {
            id: id.into(),
            target,
        })
    }
}

impl Widget for ElapsedWidget {
    fn id(&self) -> &str {
        &self.id
    }

    fn frame(&self, now: DateTime<Utc>) -> WidgetFrame {
        match DurationBreakdown::from_delta(now - self.target) {
            Some(breakdown) => WidgetFrame::Counting { breakdown },
            // Target in the future: keep checking every tick in case the
            // clock changes.
            None => WidgetFrame::Waiting,
        }
    }
}

/// Counts down to the next occurrence of a birth date.
///
/// The occurrence is derived once at construction and never re-derived: a
/// session spanning the birthday keeps celebrating until restart instead of
/// rolling over to the following year.
pub struct CountdownWidget {
    id: String,
    birth: NaiveDate,
    occurrence: DateTime<Utc>,
}

impl CountdownWidget {
    pub fn new(id: impl Into<String>, birth: NaiveDate, now: DateTime<Utc>) -> Self {
        let occurrence = TimeAnchor::Recurring(birth).next_occurrence(now);
        Self {
            id: id.into(),
            birth,
            occurrence,
        }
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth
    }

    /// Current age for the companion age display.
    pub fn age(&self, today: NaiveDate) -> AgeBreakdown {
        AgeBreakdown::at(self.birth, today)
    }
}

impl Widget for CountdownWidget {
    fn id(&self) -> &str {
        &self.id
    }

    fn frame(&self, now: DateTime<Utc>) -> WidgetFrame {
        match DurationBreakdown::from_delta(self.occurrence - now) {
            Some(breakdown) => WidgetFrame::Counting { breakdown },
            // The occurrence has passed: celebrate and refresh the age so the
            // new value shows promptly.
            None => WidgetFrame::Celebrating {
                age: AgeBreakdown::at(self.birth, now.date_naive()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_elapsed_widget_counts_up() {
        let widget = ElapsedWidget::new("timer-official", "2025-05-08T15:31:00+03:00").unwrap();
        let now = instant("2025-05-09T12:31:05Z");

        let WidgetFrame::Counting { breakdown } = widget.frame(now) else {
            panic!("expected a counting frame");
        };
        assert_eq!(breakdown.days, 1);
        assert_eq!(breakdown.hours, 0);
        assert_eq!(breakdown.minutes, 0);
        assert_eq!(breakdown.seconds, 5);
    }

    #[test]
    fn test_elapsed_widget_breakdown_matches_floored_delta() {
        let widget = ElapsedWidget::new("timer-first-message", "2025-04-18T03:35:00+03:00").unwrap();
        let target = instant("2025-04-18T00:35:00Z");

        for offset_ms in [0_i64, 1, 999, 1_000, 86_400_500, 5_432_109_876] {
            let now = target + chrono::TimeDelta::milliseconds(offset_ms);
            let WidgetFrame::Counting { breakdown } = widget.frame(now) else {
                panic!("expected a counting frame at offset {offset_ms}");
            };
            assert_eq!(breakdown.total_seconds(), offset_ms / 1_000);
        }
    }

    #[test]
    fn test_elapsed_widget_waits_on_future_target() {
        let widget = ElapsedWidget::new("timer-official", "2025-05-08T15:31:00+03:00").unwrap();
        let now = instant("2025-05-01T00:00:00Z");
        assert_eq!(widget.frame(now), WidgetFrame::Waiting);
    }

    #[test]
    fn test_elapsed_widget_rejects_unparseable_anchor() {
        assert!(ElapsedWidget::new("broken", "soon-ish").is_err());
    }

    #[test]
    fn test_countdown_widget_counts_down() {
        let birth = NaiveDate::from_ymd_opt(2002, 11, 14).unwrap();
        let setup = instant("2025-11-13T00:00:00Z");
        let widget = CountdownWidget::new("her-birthday-countdown", birth, setup);

        let WidgetFrame::Counting { breakdown } = widget.frame(setup) else {
            panic!("expected a counting frame");
        };
        assert_eq!(breakdown.days, 1);
        assert_eq!(breakdown.total_seconds(), 86_400);
    }

    #[test]
    fn test_countdown_widget_celebrates_past_occurrence() {
        let birth = NaiveDate::from_ymd_opt(2002, 11, 14).unwrap();
        let setup = instant("2025-11-13T00:00:00Z");
        let widget = CountdownWidget::new("her-birthday-countdown", birth, setup);

        let now = instant("2025-11-14T08:00:00Z");
        let WidgetFrame::Celebrating { age } = widget.frame(now) else {
            panic!("expected a celebrating frame");
        };
        assert_eq!(age.years, 23);
        assert_eq!(age.months, 0);
        assert_eq!(age.days, 0);
    }

    #[test]
    fn test_countdown_occurrence_fixed_at_construction() {
        // Known limitation, preserved: the occurrence does not roll over to
        // the next year once passed.
        let birth = NaiveDate::from_ymd_opt(2002, 11, 14).unwrap();
        let setup = instant("2025-11-13T00:00:00Z");
        let widget = CountdownWidget::new("her-birthday-countdown", birth, setup);

        let weeks_later = instant("2025-12-01T00:00:00Z");
        assert!(matches!(
            widget.frame(weeks_later),
            WidgetFrame::Celebrating { .. }
        ));
    }

    #[test]
    fn test_countdown_setup_after_birthday_targets_next_year() {
        let birth = NaiveDate::from_ymd_opt(2002, 11, 14).unwrap();
        let setup = instant("2025-11-20T00:00:00Z");
        let widget = CountdownWidget::new("her-birthday-countdown", birth, setup);

        let WidgetFrame::Counting { breakdown } = widget.frame(setup) else {
            panic!("expected a counting frame");
        };
        // Nov 20 2025 -> Nov 14 2026.
        assert_eq!(breakdown.days, 359);
    }
}
