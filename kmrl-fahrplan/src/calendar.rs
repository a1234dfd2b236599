//! Dashboard calendar feed.

use chrono::prelude::*;
use chrono::Duration;
use log::*;

use crate::generate::random_journey;
use crate::pools::*;
use crate::rng::RandomSource;
use crate::types::{CalendarEvent, ScheduleRecord};

/// Fills a week of calendar starting at `today`: a handful of random
/// services a day, then that day's maintenance window.
pub fn week_calendar<R: RandomSource>(today: NaiveDate, rng: &mut R) -> Vec<CalendarEvent> {
    let fleet = fleet();
    let per_day = CALENDAR_SERVICES_PER_DAY as usize + 1;
    let mut ret = Vec::with_capacity(CALENDAR_DAYS as usize * per_day);
    for date in today.iter_days().take(CALENDAR_DAYS as usize) {
        for _ in 0..CALENDAR_SERVICES_PER_DAY {
            let train = rng.pick(&fleet);
            let route = rng.pick(&ROUTES);
            let (departure, arrival) = random_journey(rng);
            ret.push(CalendarEvent {
                title: format!("{} ({})", train, route),
                start: date.and_time(departure),
                end: Some(date.and_time(arrival)),
                color: CalendarEvent::SERVICE_COLOR.into()
            });
        }
        let hour = rng.uniform_int(FIRST_MAINTENANCE_HOUR, LAST_MAINTENANCE_HOUR);
        let start = date.and_time(NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or_default());
        ret.push(CalendarEvent {
            title: CalendarEvent::MAINTENANCE_TITLE.into(),
            start,
            end: Some(start + Duration::hours(MAINTENANCE_HOURS)),
            color: CalendarEvent::MAINTENANCE_COLOR.into()
        });
    }
    debug!("Filled calendar week from {} with {} events", today, ret.len());
    ret
}

/// Turns generated records into calendar entries, one per record.
///
/// Records without an arrival time get an open-ended event.
pub fn events_from_records(records: &[ScheduleRecord]) -> Vec<CalendarEvent> {
    records.iter()
        .map(|rec| CalendarEvent {
            title: format!("{} ({})", rec.train_id, rec.route),
            start: rec.date.and_time(rec.departure),
            end: rec.arrival.map(|a| rec.date.and_time(a)),
            color: CalendarEvent::SERVICE_COLOR.into()
        })
        .collect()
}
