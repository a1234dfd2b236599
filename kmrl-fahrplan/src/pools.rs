//! The fixed pools demo schedules are drawn from.

use crate::types::TrainStatus;

/// Number of trainsets in the fleet pool.
pub const FLEET_SIZE: u32 = 24;

/// Routes used by date-range schedules and the dashboard calendar.
pub static ROUTES: [&str; 6] = [
    "Aluva - Petta",
    "Petta - Aluva",
    "Maharaja - Muttom",
    "Muttom - Maharaja",
    "Aluva - Maharaja",
    "Petta - Muttom"
];

/// Statuses used by date-range schedules.
pub static RANGE_STATUSES: [TrainStatus; 3] = [
    TrainStatus::OnTime,
    TrainStatus::Delayed,
    TrainStatus::Cancelled
];

/// Routes interval schedules alternate between.
pub static SHUTTLE_ROUTES: [&str; 2] = [
    "Aluva - Petta",
    "Petta - Aluva"
];

/// Statuses interval schedules cycle through.
pub static SHUTTLE_STATUSES: [TrainStatus; 3] = [
    TrainStatus::OnTime,
    TrainStatus::Boarding,
    TrainStatus::Delayed
];

/// First number handed out by the interval train counter.
pub const SHUTTLE_TRAIN_BASE: u32 = 100;

/// Earliest departure hour (inclusive).
pub const FIRST_DEPARTURE_HOUR: u32 = 6;
/// Latest departure hour (exclusive).
pub const LAST_DEPARTURE_HOUR: u32 = 20;
/// Shortest journey, in minutes.
pub const MIN_JOURNEY_MINUTES: u32 = 30;
/// Longest journey, in minutes.
pub const MAX_JOURNEY_MINUTES: u32 = 90;
/// Fewest passengers on a service.
pub const MIN_PASSENGERS: u32 = 100;
/// Most passengers on a service.
pub const MAX_PASSENGERS: u32 = 500;

/// Longest date range one request may cover, in days.
pub const MAX_RANGE_DAYS: i64 = 366;
/// Longest interval one request may cover, in hours.
pub const MAX_INTERVAL_HOURS: i64 = 7 * 24;
/// Most services one interval schedule may hold.
pub const MAX_INTERVAL_SERVICES: i64 = 2000;

/// Services shown per day on the dashboard calendar.
pub const CALENDAR_SERVICES_PER_DAY: u32 = 5;
/// Days shown on the dashboard calendar.
pub const CALENDAR_DAYS: u32 = 7;
/// Earliest maintenance window start hour (inclusive).
pub const FIRST_MAINTENANCE_HOUR: u32 = 12;
/// Latest maintenance window start hour (inclusive).
pub const LAST_MAINTENANCE_HOUR: u32 = 17;
/// How long a maintenance window lasts, in hours.
pub const MAINTENANCE_HOURS: i64 = 2;

/// Identifier of the `n`th (zero-based) trainset in the fleet, e.g. `KM-001`.
pub fn fleet_train_id(n: u32) -> String {
    format!("KM-{:03}", n + 1)
}

/// The whole fleet, in order.
pub fn fleet() -> Vec<String> {
    (0..FLEET_SIZE).map(fleet_train_id).collect()
}

/// Identifier of the `n`th (zero-based) interval service, e.g. `KM100`.
pub fn shuttle_train_id(n: u32) -> String {
    format!("KM{}", SHUTTLE_TRAIN_BASE + n)
}
