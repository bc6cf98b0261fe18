//! Weekday arithmetic for business-day deadlines.

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_business_day(day: NaiveDate) -> bool {
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Business days after `start` up to and including `end`.
///
/// The start day itself is not counted; the end day is. Returns 0 when `end`
/// is not after `start`.
pub fn business_days_elapsed(start: NaiveDate, end: NaiveDate) -> i64 {
    if end <= start {
        return 0;
    }

    let total_days = (end - start).num_days();
    let full_weeks = total_days / 7;
    let mut count = full_weeks * 5;

    let mut day = start + chrono::Duration::days(full_weeks * 7);
    while day < end {
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if is_business_day(day) {
            count += 1;
        }
    }

    count
}
