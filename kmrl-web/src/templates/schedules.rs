use serde_derive::Serialize;
use kmrl_fahrplan::ScheduleBoard;
use kmrl_fahrplan::types::{ScheduleKind, ScheduleRecord};
use kmrl_util::time::format_hm;

use crate::templates::notification::NotificationView;

/// Values to put back into the two schedule forms.
#[derive(Serialize, Default, Clone)]
pub struct ScheduleFormsView {
    pub start_date: String,
    pub end_date: String,
    pub plan_start: String,
    pub plan_end: String
}
#[derive(Serialize)]
pub struct ScheduleRow {
    pub date: String,
    pub train_id: String,
    pub route: String,
    pub departure: String,
    pub arrival: String,
    pub status: &'static str,
    pub status_color: &'static str,
    pub passengers: String
}
impl<'a> From<&'a ScheduleRecord> for ScheduleRow {
    fn from(rec: &'a ScheduleRecord) -> Self {
        ScheduleRow {
            date: rec.date.format("%Y-%m-%d").to_string(),
            train_id: rec.train_id.clone(),
            route: rec.route.clone(),
            departure: format_hm(&rec.departure),
            arrival: rec.arrival.as_ref().map(format_hm).unwrap_or_default(),
            status: rec.status.label(),
            status_color: rec.status.color(),
            passengers: rec.passengers.map(|p| p.to_string()).unwrap_or_default()
        }
    }
}
#[derive(Serialize)]
pub struct BoardView {
    /// Whether to show the arrival and passenger columns.
    pub detailed: bool,
    pub heading: String,
    pub generated_at: String,
    pub count: usize,
    pub rows: Vec<ScheduleRow>
}
impl<'a> From<&'a ScheduleBoard> for BoardView {
    fn from(board: &'a ScheduleBoard) -> Self {
        let heading = match board.kind() {
            Some(ScheduleKind::DateRange) => "Generated schedules",
            Some(ScheduleKind::Interval) => "Planned services",
            None => "No schedule generated yet"
        };
        BoardView {
            detailed: board.kind() == Some(ScheduleKind::DateRange),
            heading: heading.into(),
            generated_at: board.generated_at()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default(),
            count: board.len(),
            rows: board.records().iter().map(ScheduleRow::from).collect()
        }
    }
}
#[derive(Serialize)]
pub struct SchedulesView {
    /// Zero or one messages; a list so nothing in the view is ever null.
    pub notifications: Vec<NotificationView>,
    pub forms: ScheduleFormsView,
    pub plan_interval_minutes: i64,
    pub board: BoardView
}
