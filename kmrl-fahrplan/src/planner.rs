//! Turning form input into schedules, and keeping hold of the result.

use chrono::prelude::*;
use chrono::Duration;
use std::time::Duration as StdDuration;
use std::thread;
use log::*;

use crate::errors::FahrplanResult;
use crate::generate::{self, DateRange, Interval};
use crate::rng::RandomSource;
use crate::types::{ScheduleKind, ScheduleRecord};

/// Default gap between interval services, in minutes.
pub const DEFAULT_STEP_MINUTES: i64 = 15;

/// Validates schedule requests and runs the generators.
pub struct Planner<R> {
    rng: R,
    step: Duration,
    latency: Option<StdDuration>
}

impl<R: RandomSource> Planner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            step: Duration::minutes(DEFAULT_STEP_MINUTES),
            latency: None
        }
    }
    /// Sets the gap between interval services.
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }
    /// Makes every successful request wait this long before generating,
    /// to look like it's talking to something far away.
    pub fn with_latency(mut self, latency: Option<StdDuration>) -> Self {
        self.latency = latency;
        self
    }
    pub fn step(&self) -> Duration {
        self.step
    }
    fn simulate_latency(&self) {
        if let Some(lat) = self.latency {
            debug!("Simulating {}ms of latency", lat.as_millis());
            thread::sleep(lat);
        }
    }
    /// Generates a date-range schedule from raw `YYYY-MM-DD` form values.
    pub fn plan_date_range(&mut self, start: Option<&str>, end: Option<&str>) -> FahrplanResult<Vec<ScheduleRecord>> {
        let range = DateRange::parse(start, end)
            .map_err(|e| {
                warn!("Rejected date-range request ({:?} to {:?}): {}", start, end, e);
                e
            })?;
        self.simulate_latency();
        let ret = generate::date_range_schedule(&range, &mut self.rng);
        info!("Generated {} services from {} to {}", ret.len(), range.start, range.end);
        Ok(ret)
    }
    /// Generates an interval schedule from raw date/time form values.
    ///
    /// The step is checked along with the input, before any latency.
    pub fn plan_interval(&mut self, start: Option<&str>, end: Option<&str>) -> FahrplanResult<Vec<ScheduleRecord>> {
        let step = self.step;
        let interval = Interval::parse(start, end)
            .and_then(|i| generate::interval_len(&i, step).map(|_| i))
            .map_err(|e| {
                warn!("Rejected interval request ({:?} to {:?}): {}", start, end, e);
                e
            })?;
        self.simulate_latency();
        let ret = generate::interval_schedule(&interval, self.step)?;
        info!("Generated {} services between {} and {}", ret.len(), interval.start, interval.end);
        Ok(ret)
    }
}

/// The schedule currently on display.
#[derive(Debug, Default)]
pub struct ScheduleBoard {
    records: Vec<ScheduleRecord>,
    kind: Option<ScheduleKind>,
    generated_at: Option<DateTime<Utc>>
}

impl ScheduleBoard {
    pub fn new() -> Self {
        Self::default()
    }
    /// Puts a freshly generated schedule on display, dropping the old one.
    pub fn replace(&mut self, kind: ScheduleKind, records: Vec<ScheduleRecord>) {
        self.replace_at(kind, records, Utc::now())
    }
    pub fn replace_at(&mut self, kind: ScheduleKind, records: Vec<ScheduleRecord>, now: DateTime<Utc>) {
        debug!("Board now shows {} {:?} record(s)", records.len(), kind);
        self.records = records;
        self.kind = Some(kind);
        self.generated_at = Some(now);
    }
    /// Takes the schedule off display.
    pub fn clear(&mut self) {
        self.records.clear();
        self.kind = None;
        self.generated_at = None;
    }
    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }
    pub fn kind(&self) -> Option<ScheduleKind> {
        self.kind
    }
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
