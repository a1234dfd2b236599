//! Time calculations for schedule generation.

use chrono::prelude::*;
use chrono::Duration;

/// Number of calendar days covered by `start..=end`, never less than one.
///
/// An `end` before `start` saturates to a single day, so callers always get
/// at least the start date back.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    let diff = end.signed_duration_since(start).num_days();
    std::cmp::max(1, diff + 1)
}

/// Number of `step`-sized ticks in `start..=end`, counting `start` itself.
///
/// Returns zero if the range is empty or the step isn't positive.
pub fn steps_inclusive(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> i64 {
    if end < start || step <= Duration::zero() {
        return 0;
    }
    let span = end.signed_duration_since(start);
    span.num_seconds() / step.num_seconds().max(1) + 1
}

/// Adds `minutes` to a wall-clock time, rolling minutes over into hours
/// (and wrapping at midnight, should it come to that).
pub fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    time.overflowing_add_signed(Duration::minutes(minutes)).0
}

/// Formats a time as `HH:MM`.
pub fn format_hm(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
