//! Calendar-aware age computation.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Elapsed time since a birth date, stated the way people state ages:
/// calendar fields subtracted independently, not a fixed-length division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl AgeBreakdown {
    /// Age at `today` for someone born on `birth`.
    ///
    /// Subtracts year, month and day independently. A negative day count
    /// borrows one month and adds the length of the month preceding `today`;
    /// a negative month count then borrows one year and adds 12.
    pub fn at(birth: NaiveDate, today: NaiveDate) -> Self {
        let mut years = today.year() - birth.year();
        let mut months = today.month() as i32 - birth.month() as i32;
        let mut days = today.day() as i32 - birth.day() as i32;

        if days < 0 {
            months -= 1;
            days += days_in_previous_month(today);
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years,
            months,
            days,
        }
    }
}

/// Length in days of the month preceding `date`'s month.
fn days_in_previous_month(date: NaiveDate) -> i32 {
    let first_of_month = date
        .with_day(1)
        .expect("day 1 is valid for every month");
    let last_of_previous = first_of_month
        .pred_opt()
        .expect("date is after the calendar epoch");
    last_of_previous.day() as i32
}
