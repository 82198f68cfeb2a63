//! Fixed-radix decomposition of a wall-clock delta.

use chrono::TimeDelta;
use serde::Serialize;
use std::fmt;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// A millisecond delta decomposed into days/hours/minutes/seconds.
///
/// All components are non-negative; a negative delta has no breakdown (the
/// caller renders a waiting state instead). This measures elapsed wall-clock
/// duration, not calendar fields, so no calendar awareness is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationBreakdown {
    /// Decompose a millisecond delta by integer division in descending radix
    /// order, taking the remainder at each step. Returns `None` for negative
    /// deltas.
    pub fn from_millis(millis: i64) -> Option<Self> {
        if millis < 0 {
            return None;
        }

        Some(Self {
            days: millis / MILLIS_PER_DAY,
            hours: (millis % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
            minutes: (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            seconds: (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        })
    }

    pub fn from_delta(delta: TimeDelta) -> Option<Self> {
        Self::from_millis(delta.num_milliseconds())
    }

    /// Whole seconds represented by the breakdown.
    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
