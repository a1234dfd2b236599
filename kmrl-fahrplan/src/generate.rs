//! The demo schedule generators.
//!
//! There are two of them:
//!
//! - `date_range_schedule` runs every trainset in the fleet once a day over
//!   an inclusive range of dates, with random routes, times, statuses and
//!   loads.
//! - `interval_schedule` dispatches one numbered service per fixed step
//!   between two timestamps, cycling routes and statuses; nothing random.

use chrono::prelude::*;
use chrono::Duration;
use kmrl_util::time;
use log::*;

use crate::errors::{Boundary, FahrplanError, FahrplanResult};
use crate::pools::*;
use crate::rng::RandomSource;
use crate::types::ScheduleRecord;

/// Date-time formats accepted for interval boundaries.
static DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S"
];

/// Pulls a boundary out of a form value, treating blank as absent.
fn require(value: Option<&str>, which: Boundary) -> FahrplanResult<&str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FahrplanError::MissingInput(which))
    }
}

fn parse_date(value: &str, which: Boundary) -> FahrplanResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FahrplanError::UnparseableInput {
            field: which,
            value: value.to_owned()
        })
}

fn parse_datetime(value: &str, which: Boundary) -> FahrplanResult<NaiveDateTime> {
    DATETIME_FORMATS.iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .next()
        .ok_or_else(|| FahrplanError::UnparseableInput {
            field: which,
            value: value.to_owned()
        })
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate
}
impl DateRange {
    /// Parses a pair of `YYYY-MM-DD` form values.
    ///
    /// An end before the start is accepted; such a range covers only the
    /// start date.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> FahrplanResult<Self> {
        let start = require(start, Boundary::Start)?;
        let end = require(end, Boundary::End)?;
        let start = parse_date(start, Boundary::Start)?;
        let end = parse_date(end, Boundary::End)?;
        if end < start {
            warn!("Date range ends ({}) before it starts ({}); using the start date only", end, start);
        }
        let ret = DateRange { start, end };
        let days = ret.days();
        if days > MAX_RANGE_DAYS {
            return Err(FahrplanError::RangeTooLarge {
                requested: days,
                limit: MAX_RANGE_DAYS,
                unit: "days"
            });
        }
        Ok(ret)
    }
    /// Number of days covered; at least one.
    pub fn days(&self) -> i64 {
        time::days_inclusive(self.start, self.end)
    }
}

/// A pair of timestamps, the end strictly after the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime
}
impl Interval {
    /// Parses a pair of date/time form values.
    ///
    /// The two may be at most `MAX_INTERVAL_HOURS` apart.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> FahrplanResult<Self> {
        let start = require(start, Boundary::Start)?;
        let end = require(end, Boundary::End)?;
        let start = parse_datetime(start, Boundary::Start)?;
        let end = parse_datetime(end, Boundary::End)?;
        if end <= start {
            return Err(FahrplanError::InvalidRange {
                start: start.to_string(),
                end: end.to_string()
            });
        }
        let span = end.signed_duration_since(start);
        if span > Duration::hours(MAX_INTERVAL_HOURS) {
            return Err(FahrplanError::RangeTooLarge {
                requested: (span.num_minutes() + 59) / 60,
                limit: MAX_INTERVAL_HOURS,
                unit: "hours"
            });
        }
        Ok(Interval { start, end })
    }
}

/// Draws one random service for `train_id` on `date`.
///
/// Draw order is route, hour, minute, journey length, status, load.
pub(crate) fn random_service<R: RandomSource>(rng: &mut R, date: NaiveDate, train_id: String) -> ScheduleRecord {
    let route = *rng.pick(&ROUTES);
    let (departure, arrival) = random_journey(rng);
    let status = *rng.pick(&RANGE_STATUSES);
    let passengers = rng.uniform_int(MIN_PASSENGERS, MAX_PASSENGERS);
    ScheduleRecord {
        date,
        train_id,
        route: route.into(),
        departure,
        arrival: Some(arrival),
        status,
        passengers: Some(passengers)
    }
}

/// Draws a departure within the operating window and an arrival
/// 30 to 90 minutes later.
pub(crate) fn random_journey<R: RandomSource>(rng: &mut R) -> (NaiveTime, NaiveTime) {
    let hour = rng.uniform_int(FIRST_DEPARTURE_HOUR, LAST_DEPARTURE_HOUR - 1);
    let minute = rng.uniform_int(0, 59);
    let offset = rng.uniform_int(MIN_JOURNEY_MINUTES, MAX_JOURNEY_MINUTES);
    let departure = NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0)
        .unwrap_or_default();
    let arrival = time::add_minutes(departure, offset as i64);
    (departure, arrival)
}

/// Runs every trainset in the fleet once on every day of `range`.
///
/// Produces `range.days() * FLEET_SIZE` records, day by day, in fleet order.
pub fn date_range_schedule<R: RandomSource>(range: &DateRange, rng: &mut R) -> Vec<ScheduleRecord> {
    let days = range.days();
    debug!("Generating {} day(s) x {} trains from {}", days, FLEET_SIZE, range.start);
    let fleet = fleet();
    let mut ret = Vec::with_capacity(days as usize * fleet.len());
    for date in range.start.iter_days().take(days as usize) {
        for train_id in fleet.iter() {
            ret.push(random_service(rng, date, train_id.clone()));
        }
    }
    ret
}

/// Number of services `interval_schedule` would dispatch, checking the step
/// is positive and the count stays under `MAX_INTERVAL_SERVICES`.
pub fn interval_len(interval: &Interval, step: Duration) -> FahrplanResult<i64> {
    if step <= Duration::zero() {
        return Err(FahrplanError::InvalidStep(step.num_minutes()));
    }
    let count = time::steps_inclusive(interval.start, interval.end, step);
    if count > MAX_INTERVAL_SERVICES {
        return Err(FahrplanError::RangeTooLarge {
            requested: count,
            limit: MAX_INTERVAL_SERVICES,
            unit: "services"
        });
    }
    Ok(count)
}

/// Dispatches one service every `step` from `interval.start` up to and
/// including `interval.end`.
///
/// Routes and statuses cycle by record index; train numbers count up from
/// `SHUTTLE_TRAIN_BASE`.
pub fn interval_schedule(interval: &Interval, step: Duration) -> FahrplanResult<Vec<ScheduleRecord>> {
    let count = interval_len(interval, step)?;
    debug!("Generating {} service(s) every {}min from {}", count, step.num_minutes(), interval.start);
    let mut ret = Vec::with_capacity(count as usize);
    let mut current = interval.start;
    let mut idx = 0;
    while current <= interval.end {
        ret.push(ScheduleRecord {
            date: current.date(),
            train_id: shuttle_train_id(idx as u32),
            route: SHUTTLE_ROUTES[idx % SHUTTLE_ROUTES.len()].into(),
            departure: current.time(),
            arrival: None,
            status: SHUTTLE_STATUSES[idx % SHUTTLE_STATUSES.len()],
            passengers: None
        });
        idx += 1;
        current = match current.checked_add_signed(step) {
            Some(c) => c,
            None => break
        };
    }
    Ok(ret)
}
