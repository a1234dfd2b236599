use serde_derive::Serialize;
use kmrl_fahrplan::types::CalendarEvent;

#[derive(Serialize)]
pub struct FleetView {
    pub total: u32,
    pub ready: u32,
    pub standby: u32,
    pub maintenance: u32
}
#[derive(Serialize)]
pub struct CalendarRow {
    pub date: String,
    pub start: String,
    pub end: String,
    pub title: String,
    pub color: String,
    pub maintenance: bool
}
impl<'a> From<&'a CalendarEvent> for CalendarRow {
    fn from(ev: &'a CalendarEvent) -> Self {
        CalendarRow {
            date: ev.start.format("%Y-%m-%d").to_string(),
            start: ev.start.format("%H:%M").to_string(),
            end: ev.end.map(|e| e.format("%H:%M").to_string())
                .unwrap_or_default(),
            title: ev.title.clone(),
            color: ev.color.clone(),
            maintenance: ev.is_maintenance()
        }
    }
}
#[derive(Serialize)]
pub struct QuickStatsView {
    pub total_trains: u32,
    pub active_routes: u32,
    pub daily_passengers: u32,
    pub system_efficiency: String
}
#[derive(Serialize)]
pub struct DashboardView {
    pub fleet: FleetView,
    pub stats: QuickStatsView,
    pub constraint_count: usize,
    pub schedule_count: usize,
    pub calendar: Vec<CalendarRow>
}
