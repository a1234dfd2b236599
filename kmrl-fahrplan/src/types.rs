//! Schedule, calendar and constraint types.

use chrono::prelude::*;
use serde_derive::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a dashboard notification, named after the Bootstrap alert
/// classes the templates use.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Danger
}
impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            NotificationLevel::Success => "success",
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Danger => "danger"
        }
    }
}

/// Running status of a generated service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainStatus {
    #[serde(rename = "On Time")]
    OnTime,
    #[serde(rename = "Boarding")]
    Boarding,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Cancelled")]
    Cancelled
}
impl TrainStatus {
    pub fn label(&self) -> &'static str {
        match *self {
            TrainStatus::OnTime => "On Time",
            TrainStatus::Boarding => "Boarding",
            TrainStatus::Delayed => "Delayed",
            TrainStatus::Cancelled => "Cancelled"
        }
    }
    /// Badge colour for this status.
    pub fn color(&self) -> &'static str {
        match *self {
            TrainStatus::OnTime => "success",
            TrainStatus::Boarding => "warning",
            TrainStatus::Delayed => "danger",
            TrainStatus::Cancelled => "dark"
        }
    }
}
impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One synthetic train departure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    /// Day this service runs on.
    pub date: NaiveDate,
    /// Train identifier, e.g. `KM-007` or `KM104`.
    pub train_id: String,
    /// Route name, e.g. `Aluva - Petta`.
    pub route: String,
    /// Departure time.
    #[serde(rename = "departureTime", with = "crate::hhmm")]
    pub departure: NaiveTime,
    /// Arrival time; only date-range schedules have one.
    #[serde(rename = "arrivalTime", with = "crate::hhmm::option", default)]
    pub arrival: Option<NaiveTime>,
    pub status: TrainStatus,
    /// Passenger count; only date-range schedules have one.
    #[serde(default)]
    pub passengers: Option<u32>
}

/// Which generator produced a set of records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleKind {
    /// Every pool train, every day of a date range, random times.
    DateRange,
    /// One train per fixed step between two timestamps.
    Interval
}

/// An entry for the dashboard calendar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub color: String
}
impl CalendarEvent {
    /// Colour used for passenger services.
    pub const SERVICE_COLOR: &'static str = "#0066cc";
    /// Colour used for maintenance windows.
    pub const MAINTENANCE_COLOR: &'static str = "#dc3545";
    /// Title given to maintenance windows.
    pub const MAINTENANCE_TITLE: &'static str = "Maintenance Window";

    pub fn is_maintenance(&self) -> bool {
        self.title == Self::MAINTENANCE_TITLE
    }
}

/// Constraint identifier: the creation time, in milliseconds since the epoch.
pub type ConstraintId = i64;

/// How serious an operational constraint is.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical
}
impl Severity {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical"
        }
    }
    /// Badge colour for this severity.
    pub fn color(&self) -> &'static str {
        match *self {
            Severity::Low => "success",
            Severity::Medium => "warning",
            Severity::High => "danger",
            Severity::Critical => "dark"
        }
    }
}
impl FromStr for Severity {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(())
        }
    }
}

/// Depot-side constraint on a particular trainset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepotConstraint {
    pub train_id: String,
    pub fitness_date: String,
    pub job_card_status: String,
    pub branding_priority: String,
    pub mileage: String,
    pub cleaning_slot: String,
    pub stabling_position: String
}

/// Network-side constraint affecting a route for a period.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OperationalConstraint {
    #[serde(rename = "type")]
    pub constraint_type: String,
    pub route: String,
    pub start_date: String,
    pub end_date: String,
    pub severity: Severity,
    pub description: String,
    pub notify_passengers: bool
}

/// The two shapes of constraint the dashboard accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConstraintDetails {
    Depot(DepotConstraint),
    Operational(OperationalConstraint)
}

/// A stored constraint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: ConstraintId,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: ConstraintDetails
}
