use super::*;
use chrono::prelude::*;
use chrono::Duration;
use std::collections::VecDeque;
use std::time::{Duration as StdDuration, Instant};
use kmrl_util::http::StatusCode;

use crate::calendar::*;
use crate::errors::Boundary;
use crate::generate::*;
use crate::pools::*;
use crate::types::*;

/// Hands out predetermined values (clamped into range), then minimums.
struct ScriptedRandom(VecDeque<u32>);
impl ScriptedRandom {
    fn new(vals: &[u32]) -> Self {
        ScriptedRandom(vals.iter().cloned().collect())
    }
}
impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        self.0.pop_front().unwrap_or(min).max(min).min(max)
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd(y, m, d)
}
fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms(h, m, 0)
}
fn minutes_between(a: NaiveTime, b: NaiveTime) -> i64 {
    b.signed_duration_since(a).num_minutes()
}

#[test]
fn date_range_two_days() {
    let mut rng = SeededRandom::from_seed_u64(1);
    let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-02")).unwrap();
    let recs = date_range_schedule(&range, &mut rng);
    assert_eq!(recs.len(), 48);
    assert!(recs[..24].iter().all(|r| r.date == ymd(2024, 1, 1)));
    assert!(recs[24..].iter().all(|r| r.date == ymd(2024, 1, 2)));
    assert_eq!(recs[0].train_id, "KM-001");
    assert_eq!(recs[23].train_id, "KM-024");
    assert_eq!(recs[24].train_id, "KM-001");
}

#[test]
fn date_range_count_scales_with_days() {
    let mut rng = SeededRandom::from_seed_u64(2);
    let range = DateRange::parse(Some("2024-02-27"), Some("2024-03-02")).unwrap();
    assert_eq!(range.days(), 5);
    assert_eq!(date_range_schedule(&range, &mut rng).len(), 5 * 24);
}

#[test]
fn date_range_backwards_is_one_day() {
    let mut rng = SeededRandom::from_seed_u64(3);
    let range = DateRange::parse(Some("2024-01-05"), Some("2024-01-01")).unwrap();
    let recs = date_range_schedule(&range, &mut rng);
    assert_eq!(recs.len(), 24);
    assert!(recs.iter().all(|r| r.date == ymd(2024, 1, 5)));
}

#[test]
fn date_range_values_stay_in_bounds() {
    for seed in 0..20 {
        let mut rng = SeededRandom::from_seed_u64(seed);
        let range = DateRange::parse(Some("2024-06-01"), Some("2024-06-03")).unwrap();
        for rec in date_range_schedule(&range, &mut rng) {
            assert!(rec.departure.hour() >= 6 && rec.departure.hour() < 20);
            assert!(rec.departure.minute() < 60);
            let arrival = rec.arrival.unwrap();
            let offset = minutes_between(rec.departure, arrival);
            assert!(offset >= 30 && offset <= 90, "offset {} out of range", offset);
            let pax = rec.passengers.unwrap();
            assert!(pax >= 100 && pax <= 500);
            assert!(ROUTES.contains(&rec.route.as_str()));
            assert!(RANGE_STATUSES.contains(&rec.status));
        }
    }
}

#[test]
fn arrival_rolls_minutes_into_hours() {
    // route 2, 19h, 50m, +80min, status 1, 321 passengers
    let mut rng = ScriptedRandom::new(&[2, 19, 50, 80, 1, 321]);
    let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-01")).unwrap();
    let recs = date_range_schedule(&range, &mut rng);
    let first = &recs[0];
    assert_eq!(first.route, "Maharaja - Muttom");
    assert_eq!(first.departure, hm(19, 50));
    assert_eq!(first.arrival, Some(hm(21, 10)));
    assert_eq!(first.status, TrainStatus::Delayed);
    assert_eq!(first.passengers, Some(321));
    assert_eq!(first.date, ymd(2024, 1, 1));
}

#[test]
fn seeded_sources_repeat_themselves() {
    let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-03")).unwrap();
    let a = date_range_schedule(&range, &mut SeededRandom::from_seed_u64(42));
    let b = date_range_schedule(&range, &mut SeededRandom::from_seed_u64(42));
    assert_eq!(a, b);
}

#[test]
fn interval_quarter_hours() {
    let iv = Interval::parse(Some("2024-01-01T09:00"), Some("2024-01-01T10:00")).unwrap();
    let recs = interval_schedule(&iv, Duration::minutes(15)).unwrap();
    let times: Vec<String> = recs.iter()
        .map(|r| r.departure.format("%H:%M").to_string())
        .collect();
    assert_eq!(times, vec!["09:00", "09:15", "09:30", "09:45", "10:00"]);
    let ids: Vec<&str> = recs.iter().map(|r| r.train_id.as_str()).collect();
    assert_eq!(ids, vec!["KM100", "KM101", "KM102", "KM103", "KM104"]);
    assert_eq!(recs[0].route, "Aluva - Petta");
    assert_eq!(recs[1].route, "Petta - Aluva");
    assert_eq!(recs[2].route, "Aluva - Petta");
    assert_eq!(recs[0].status, TrainStatus::OnTime);
    assert_eq!(recs[1].status, TrainStatus::Boarding);
    assert_eq!(recs[2].status, TrainStatus::Delayed);
    assert_eq!(recs[3].status, TrainStatus::OnTime);
    assert!(recs.iter().all(|r| r.arrival.is_none() && r.passengers.is_none()));
}

#[test]
fn interval_count_floors_and_steps_evenly() {
    let iv = Interval::parse(Some("2024-01-01 22:00"), Some("2024-01-02 01:10")).unwrap();
    let recs = interval_schedule(&iv, Duration::minutes(15)).unwrap();
    // 190 minutes -> floor(190 / 15) + 1
    assert_eq!(recs.len(), 13);
    for pair in recs.windows(2) {
        let a = pair[0].date.and_time(pair[0].departure);
        let b = pair[1].date.and_time(pair[1].departure);
        assert_eq!(b - a, Duration::minutes(15));
    }
    assert_eq!(recs.last().unwrap().date, ymd(2024, 1, 2));
}

#[test]
fn interval_rejects_non_positive_step() {
    let iv = Interval::parse(Some("2024-01-01T09:00"), Some("2024-01-01T10:00")).unwrap();
    assert_eq!(interval_schedule(&iv, Duration::zero()), Err(FahrplanError::InvalidStep(0)));
}

#[test]
fn interval_end_must_follow_start() {
    let err = Interval::parse(Some("2024-01-01T10:00"), Some("2024-01-01T09:00")).unwrap_err();
    match err {
        FahrplanError::InvalidRange { .. } => {},
        e => panic!("unexpected error {:?}", e)
    }
    let err = Interval::parse(Some("2024-01-01T10:00"), Some("2024-01-01T10:00")).unwrap_err();
    assert_eq!(err.level(), NotificationLevel::Danger);
    assert_eq!(err.user_message(), "End must be after Start.");
}

#[test]
fn blank_boundaries_are_missing() {
    assert_eq!(DateRange::parse(None, Some("2024-01-01")), Err(FahrplanError::MissingInput(Boundary::Start)));
    assert_eq!(DateRange::parse(Some("2024-01-01"), Some("  ")), Err(FahrplanError::MissingInput(Boundary::End)));
    let err = Interval::parse(Some(""), None).unwrap_err();
    assert_eq!(err, FahrplanError::MissingInput(Boundary::Start));
    assert_eq!(err.level(), NotificationLevel::Warning);
}

#[test]
fn garbage_boundaries_are_unparseable() {
    let err = DateRange::parse(Some("2024-13-01"), Some("2024-01-02")).unwrap_err();
    assert_eq!(err, FahrplanError::UnparseableInput {
        field: Boundary::Start,
        value: "2024-13-01".into()
    });
    let err = Interval::parse(Some("2024-01-01T09:00"), Some("tomorrow")).unwrap_err();
    assert_eq!(err.user_message(), "Invalid date/time format.");
    assert_eq!(err.level(), NotificationLevel::Danger);
}

#[test]
fn interval_accepts_seconds() {
    let iv = Interval::parse(Some("2024-01-01T09:00:00"), Some("2024-01-01 09:30:00")).unwrap();
    assert_eq!(iv.start, ymd(2024, 1, 1).and_hms(9, 0, 0));
    assert_eq!(iv.end, ymd(2024, 1, 1).and_hms(9, 30, 0));
}

#[test]
fn planner_failure_produces_nothing() {
    let mut planner = Planner::new(SeededRandom::from_seed_u64(7));
    let mut board = ScheduleBoard::new();
    let recs = planner.plan_date_range(Some("2024-01-01"), Some("2024-01-01")).unwrap();
    board.replace(ScheduleKind::DateRange, recs);
    assert_eq!(board.len(), 24);
    match planner.plan_interval(Some("2024-01-01T09:00"), None) {
        Ok(_) => panic!("missing end accepted"),
        Err(e) => assert_eq!(e, FahrplanError::MissingInput(Boundary::End))
    }
    assert_eq!(board.len(), 24);
    assert_eq!(board.kind(), Some(ScheduleKind::DateRange));
}

#[test]
fn planner_uses_configured_step() {
    let mut planner = Planner::new(SeededRandom::from_seed_u64(7))
        .with_step(Duration::minutes(30));
    let recs = planner.plan_interval(Some("2024-01-01T09:00"), Some("2024-01-01T10:00")).unwrap();
    assert_eq!(recs.len(), 3);
}

#[test]
fn planner_latency_only_on_valid_requests() {
    let mut planner = Planner::new(SeededRandom::from_seed_u64(7))
        .with_latency(Some(StdDuration::from_millis(30)));
    let start = Instant::now();
    assert!(planner.plan_date_range(None, None).is_err());
    assert!(start.elapsed() < StdDuration::from_millis(30));
    let start = Instant::now();
    planner.plan_date_range(Some("2024-01-01"), Some("2024-01-01")).unwrap();
    assert!(start.elapsed() >= StdDuration::from_millis(30));
}

#[test]
fn planner_rejects_bad_step_before_latency() {
    let mut planner = Planner::new(SeededRandom::from_seed_u64(7))
        .with_step(Duration::zero())
        .with_latency(Some(StdDuration::from_millis(500)));
    let start = Instant::now();
    let err = planner.plan_interval(Some("2024-01-01T09:00"), Some("2024-01-01T10:00")).unwrap_err();
    assert_eq!(err, FahrplanError::InvalidStep(0));
    assert!(start.elapsed() < StdDuration::from_millis(500));
}

#[test]
fn huge_date_ranges_are_refused() {
    let err = DateRange::parse(Some("0001-01-01"), Some("9999-12-31")).unwrap_err();
    match err.clone() {
        FahrplanError::RangeTooLarge { limit, unit, .. } => {
            assert_eq!(limit, MAX_RANGE_DAYS);
            assert_eq!(unit, "days");
        },
        e => panic!("unexpected error {:?}", e)
    }
    assert_eq!(err.level(), NotificationLevel::Danger);
    assert_eq!(err.status_code(), 400);
    let mut planner = Planner::new(SeededRandom::from_seed_u64(7));
    assert!(planner.plan_date_range(Some("2000-01-01"), Some("2099-12-31")).is_err());
    // a leap year is the most one request can ask for
    let range = DateRange::parse(Some("2024-01-01"), Some("2024-12-31")).unwrap();
    assert_eq!(range.days(), MAX_RANGE_DAYS);
    assert!(DateRange::parse(Some("2024-01-01"), Some("2025-01-01")).is_err());
}

#[test]
fn huge_intervals_are_refused() {
    let err = Interval::parse(Some("0001-01-01T00:00"), Some("9999-12-31T23:59")).unwrap_err();
    match err.clone() {
        FahrplanError::RangeTooLarge { limit, unit, .. } => {
            assert_eq!(limit, MAX_INTERVAL_HOURS);
            assert_eq!(unit, "hours");
        },
        e => panic!("unexpected error {:?}", e)
    }
    let week = Interval::parse(Some("2024-01-01T00:00"), Some("2024-01-08T00:00")).unwrap();
    assert_eq!(interval_len(&week, Duration::minutes(15)), Ok(673));
    assert!(Interval::parse(Some("2024-01-01T00:00"), Some("2024-01-08T00:01")).is_err());
    // a tiny step can still ask for too much within the allowed span
    match interval_schedule(&week, Duration::minutes(1)) {
        Err(FahrplanError::RangeTooLarge { requested, limit, .. }) => {
            assert_eq!(requested, 7 * 24 * 60 + 1);
            assert_eq!(limit, MAX_INTERVAL_SERVICES);
        },
        other => panic!("unexpected result {:?}", other.map(|r| r.len()))
    }
}

#[test]
fn board_replace_and_clear() {
    let mut board = ScheduleBoard::new();
    assert!(board.is_empty());
    assert_eq!(board.kind(), None);
    let iv = Interval::parse(Some("2024-01-01T09:00"), Some("2024-01-01T09:30")).unwrap();
    let now = Utc.ymd(2024, 1, 1).and_hms(8, 0, 0);
    board.replace_at(ScheduleKind::Interval, interval_schedule(&iv, Duration::minutes(15)).unwrap(), now);
    assert_eq!(board.len(), 3);
    assert_eq!(board.generated_at(), Some(now));
    board.clear();
    assert!(board.is_empty());
    assert_eq!(board.generated_at(), None);
}

#[test]
fn calendar_week_shape() {
    let today = ymd(2024, 3, 10);
    let events = week_calendar(today, &mut SeededRandom::from_seed_u64(11));
    assert_eq!(events.len(), 42);
    let maint: Vec<&CalendarEvent> = events.iter().filter(|e| e.is_maintenance()).collect();
    assert_eq!(maint.len(), 7);
    for (i, m) in maint.iter().enumerate() {
        assert_eq!(m.start.date(), today + Duration::days(i as i64));
        assert!(m.start.hour() >= 12 && m.start.hour() <= 17);
        assert_eq!(m.end, Some(m.start + Duration::hours(2)));
        assert_eq!(m.color, "#dc3545");
    }
    for e in events.iter().filter(|e| !e.is_maintenance()) {
        assert!(e.start.date() >= today && e.start.date() < today + Duration::days(7));
        assert!(e.title.starts_with("KM-"));
        assert_eq!(e.color, "#0066cc");
        let dur = e.end.unwrap() - e.start;
        assert!(dur >= Duration::minutes(30) && dur <= Duration::minutes(90));
    }
}

#[test]
fn calendar_from_records() {
    let iv = Interval::parse(Some("2024-01-01T09:00"), Some("2024-01-01T09:15")).unwrap();
    let recs = interval_schedule(&iv, Duration::minutes(15)).unwrap();
    let events = events_from_records(&recs);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "KM100 (Aluva - Petta)");
    assert_eq!(events[1].start, ymd(2024, 1, 1).and_hms(9, 15, 0));
    assert_eq!(events[1].end, None);
}

fn depot(train: &str) -> ConstraintDetails {
    ConstraintDetails::Depot(DepotConstraint {
        train_id: train.into(),
        fitness_date: "2024-05-01".into(),
        job_card_status: "open".into(),
        branding_priority: "high".into(),
        mileage: "12000".into(),
        cleaning_slot: "night".into(),
        stabling_position: "B4".into()
    })
}

#[test]
fn constraint_ids_increase() {
    let mut book = ConstraintBook::new();
    let now = Utc.ymd(2024, 1, 1).and_hms(12, 0, 0);
    let a = book.add_at(depot("KM-001"), now).unwrap();
    let b = book.add_at(depot("KM-002"), now).unwrap();
    assert_eq!(a, now.timestamp_millis());
    assert_eq!(b, a + 1);
    let ids: Vec<ConstraintId> = book.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn constraint_replace_and_remove() {
    let mut book = ConstraintBook::new();
    let a = book.add(depot("KM-001")).unwrap();
    let b = book.add(depot("KM-002")).unwrap();
    book.replace(a, depot("KM-009")).unwrap();
    match book.get(a).unwrap().details {
        ConstraintDetails::Depot(ref d) => assert_eq!(d.train_id, "KM-009"),
        _ => panic!("wrong shape")
    }
    assert_eq!(book.iter().next().unwrap().id, a);
    let gone = book.remove(b).unwrap();
    assert_eq!(gone.id, b);
    assert_eq!(book.len(), 1);
    assert_eq!(book.remove(b).unwrap_err(), FahrplanError::ConstraintNotFound(b));
    assert_eq!(book.replace(b, depot("KM-003")).unwrap_err(), FahrplanError::ConstraintNotFound(b));
}

#[test]
fn constraint_presence_checked() {
    let mut book = ConstraintBook::new();
    let err = book.add(depot("  ")).unwrap_err();
    assert_eq!(err, FahrplanError::ConstraintFieldMissing("train ID"));
    assert!(book.is_empty());
    let op = ConstraintDetails::Operational(OperationalConstraint {
        constraint_type: "maintenance".into(),
        route: "Aluva - Petta".into(),
        start_date: "2024-01-01 09:00".into(),
        end_date: "2024-01-01 11:00".into(),
        severity: Severity::High,
        description: String::new(),
        notify_passengers: true
    });
    book.add(op).unwrap();
    assert_eq!(book.len(), 1);
}

#[test]
fn severity_parsing() {
    assert_eq!("Critical".parse::<Severity>(), Ok(Severity::Critical));
    assert_eq!(" low ".parse::<Severity>(), Ok(Severity::Low));
    assert!("urgent".parse::<Severity>().is_err());
    assert_eq!(Severity::Medium.color(), "warning");
}

#[test]
fn record_json_shape() {
    let mut rng = ScriptedRandom::new(&[0, 6, 5, 30, 0, 100]);
    let range = DateRange::parse(Some("2024-01-01"), Some("2024-01-01")).unwrap();
    let rec = date_range_schedule(&range, &mut rng).remove(0);
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["date"], "2024-01-01");
    assert_eq!(json["trainId"], "KM-001");
    assert_eq!(json["route"], "Aluva - Petta");
    assert_eq!(json["departureTime"], "06:05");
    assert_eq!(json["arrivalTime"], "06:35");
    assert_eq!(json["status"], "On Time");
    assert_eq!(json["passengers"], 100);
    let back: ScheduleRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn constraint_json_is_flat() {
    let mut book = ConstraintBook::new();
    let id = book.add(depot("KM-004")).unwrap();
    let json = serde_json::to_value(book.get(id).unwrap()).unwrap();
    assert_eq!(json["kind"], "depot");
    assert_eq!(json["trainId"], "KM-004");
    assert_eq!(json["id"], id);
}
