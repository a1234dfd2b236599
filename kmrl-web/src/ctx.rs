//! Main server context.

use handlebars::Handlebars;
use rouille::{Request, Response, router};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration as StdDuration;
use chrono::prelude::*;
use chrono::Duration;
use kmrl_util::http::{HttpServer, StatusCode};
use kmrl_fahrplan::{Planner, ScheduleBoard, ConstraintBook, SeededRandom};
use kmrl_fahrplan::calendar;
use kmrl_fahrplan::pools::FLEET_SIZE;
use kmrl_fahrplan::types::{CalendarEvent, ConstraintId, ConstraintDetails, NotificationLevel, ScheduleKind};
use log::*;

use crate::api::*;
use crate::config::Config;
use crate::tmpl::TemplateContext;
use crate::errors::*;
use crate::forms::*;
use crate::templates::constraints::*;
use crate::templates::notification::NotificationView;
use crate::templates::schedules::*;

fn random_source(seed: Option<u64>) -> SeededRandom {
    match seed {
        Some(seed) => SeededRandom::from_seed_u64(seed),
        None => SeededRandom::from_entropy()
    }
}

fn lock<T>(mtx: &Mutex<T>) -> WebResult<MutexGuard<T>> {
    mtx.lock()
        .map_err(|_| {
            error!("App state mutex poisoned");
            WebError::StatePoisoned
        })
}

pub struct App {
    hbs: Handlebars,
    cfg: Config,
    // Lock order: planner, then board.
    planner: Mutex<Planner<SeededRandom>>,
    // Kept apart from the planner, which may be sleeping.
    calendar_rng: Mutex<SeededRandom>,
    board: Mutex<ScheduleBoard>,
    book: Mutex<ConstraintBook>
}
impl App {
    pub fn new(cfg: &Config, hbs: Handlebars) -> Result<Self> {
        cfg.validate()?;
        if let Some(seed) = cfg.rng_seed {
            info!("Seeding schedule generators with {}", seed);
        }
        let planner = Planner::new(random_source(cfg.rng_seed))
            .with_step(Duration::minutes(cfg.plan_interval_minutes))
            .with_latency(cfg.simulated_latency_ms.map(StdDuration::from_millis));
        let calendar_rng = random_source(cfg.rng_seed.map(|s| s.wrapping_add(1)));
        Ok(App {
            hbs,
            cfg: cfg.clone(),
            planner: Mutex::new(planner),
            calendar_rng: Mutex::new(calendar_rng),
            board: Mutex::new(ScheduleBoard::new()),
            book: Mutex::new(ConstraintBook::new())
        })
    }
    fn calendar_week(&self) -> WebResult<Vec<CalendarEvent>> {
        let today = Local::now().date_naive();
        let mut rng = lock(&self.calendar_rng)?;
        Ok(calendar::week_calendar(today, &mut *rng))
    }
    fn dashboard(&self) -> WebResult<Response> {
        use crate::templates::dashboard::*;

        let calendar = self.calendar_week()?;
        let schedule_count = lock(&self.board)?.len();
        let constraint_count = lock(&self.book)?.len();
        Ok(TemplateContext {
            template: "dashboard",
            title: "Dashboard".into(),
            body: DashboardView {
                fleet: FleetView {
                    total: self.cfg.fleet_total,
                    ready: self.cfg.fleet_ready,
                    standby: self.cfg.fleet_standby,
                    maintenance: self.cfg.fleet_maintenance
                },
                stats: QuickStatsView {
                    total_trains: FLEET_SIZE,
                    active_routes: self.cfg.active_routes,
                    daily_passengers: self.cfg.daily_passengers,
                    system_efficiency: format!("{:.1}%", self.cfg.system_efficiency)
                },
                constraint_count,
                schedule_count,
                calendar: calendar.iter().map(CalendarRow::from).collect()
            }
        }.render(&self.hbs)?)
    }
    fn schedules_page(&self, notification: Option<NotificationView>, forms: ScheduleFormsView, status: u16) -> WebResult<Response> {
        let board = lock(&self.board)?;
        TemplateContext {
            template: "schedules",
            title: "Schedules".into(),
            body: SchedulesView {
                notifications: notification.into_iter().collect(),
                forms,
                plan_interval_minutes: self.cfg.plan_interval_minutes,
                board: BoardView::from(&*board)
            }
        }.render_status(&self.hbs, status)
    }
    /// Runs one of the two schedule forms through the planner and puts the
    /// result on the board.
    fn generate(&self, req: &Request, kind: ScheduleKind) -> WebResult<Response> {
        let form = read_form(req)?;
        let forms = ScheduleFormsView {
            start_date: field(&form, "startDate").unwrap_or("").to_owned(),
            end_date: field(&form, "endDate").unwrap_or("").to_owned(),
            plan_start: field(&form, "planStart").unwrap_or("").to_owned(),
            plan_end: field(&form, "planEnd").unwrap_or("").to_owned()
        };
        let (result, success) = {
            let mut planner = lock(&self.planner)?;
            match kind {
                ScheduleKind::DateRange => {
                    let res = planner.plan_date_range(field(&form, "startDate"), field(&form, "endDate"));
                    (res, "Schedules generated successfully!")
                },
                ScheduleKind::Interval => {
                    let res = planner.plan_interval(field(&form, "planStart"), field(&form, "planEnd"));
                    (res, "Schedule generated successfully!")
                }
            }
        };
        match result {
            Ok(records) => {
                lock(&self.board)?.replace(kind, records);
                self.schedules_page(Some(NotificationView::success(success)), forms, 200)
            },
            Err(e) => {
                self.schedules_page(Some(NotificationView::from(&e)), forms, e.status_code())
            }
        }
    }
    fn constraints_view(&self, notification: Option<NotificationView>) -> WebResult<ConstraintsView> {
        let book = lock(&self.book)?;
        Ok(ConstraintsView::new(book.iter(), notification))
    }
    fn constraints_page(&self, view: ConstraintsView, status: u16) -> WebResult<Response> {
        TemplateContext {
            template: "constraints",
            title: "Constraints".into(),
            body: view
        }.render_status(&self.hbs, status)
    }
    /// Adds a constraint, or replaces the one with ID `editing`.
    fn submit_constraint(&self, req: &Request, editing: Option<ConstraintId>) -> WebResult<Response> {
        let form = read_form(req)?;
        let outcome = details_from_form(&form)
            .and_then(|details| {
                let mut book = lock(&self.book)?;
                let ret = match editing {
                    Some(id) => book.replace(id, details)
                        .map(|_| "Constraint updated successfully!"),
                    None => book.add(details)
                        .map(|_| "Constraint added successfully!")
                };
                Ok(ret?)
            });
        match outcome {
            Ok(msg) => {
                let view = self.constraints_view(Some(NotificationView::success(msg)))?;
                self.constraints_page(view, 200)
            },
            Err(WebError::Fahrplan(e)) => {
                let mut view = self.constraints_view(Some(NotificationView::from(&e)))?;
                if field(&form, "kind") == Some("operational") {
                    view.operational_form = OperationalFormView::from_form(&form, editing);
                }
                else {
                    view.depot_form = DepotFormView::from_form(&form, editing);
                }
                self.constraints_page(view, e.status_code())
            },
            Err(e) => Err(e)
        }
    }
}
impl HttpServer for App {
    type Error = WebError;

    fn on_request(&self, req: &Request) -> WebResult<Response> {
        router!(req,
            (GET) (/) => {
                self.dashboard()
            },
            (GET) (/calendar/events) => {
                Ok(Response::json(&self.calendar_week()?))
            },
            (GET) (/calendar/schedules) => {
                let board = lock(&self.board)?;
                Ok(Response::json(&calendar::events_from_records(board.records())))
            },
            (GET) (/schedules) => {
                self.schedules_page(None, ScheduleFormsView::default(), 200)
            },
            (POST) (/schedules) => {
                self.generate(req, ScheduleKind::DateRange)
            },
            (POST) (/schedules/plan) => {
                self.generate(req, ScheduleKind::Interval)
            },
            (POST) (/schedules/clear) => {
                lock(&self.board)?.clear();
                let cleared = NotificationView::new(NotificationLevel::Info, "Schedule cleared.");
                self.schedules_page(Some(cleared), ScheduleFormsView::default(), 200)
            },
            (GET) (/api/schedules) => {
                let board = lock(&self.board)?;
                Ok(Response::json(&board.records()))
            },
            (GET) (/constraints) => {
                let view = self.constraints_view(None)?;
                self.constraints_page(view, 200)
            },
            (POST) (/constraints) => {
                self.submit_constraint(req, None)
            },
            (GET) (/constraints/{id: ConstraintId}/edit) => {
                let constraint = lock(&self.book)?.get(id).cloned()
                    .ok_or(WebError::NotFound)?;
                let mut view = self.constraints_view(None)?;
                match constraint.details {
                    ConstraintDetails::Depot(ref d) => {
                        view.depot_form = DepotFormView::from_constraint(id, d);
                    },
                    ConstraintDetails::Operational(ref o) => {
                        view.operational_form = OperationalFormView::from_constraint(id, o);
                    }
                }
                self.constraints_page(view, 200)
            },
            (POST) (/constraints/{id: ConstraintId}/delete) => {
                let removed = lock(&self.book)?.remove(id);
                let (notification, status) = match removed {
                    Ok(_) => (NotificationView::success("Constraint deleted successfully!"), 200),
                    Err(e) => (NotificationView::from(&e), e.status_code())
                };
                let view = self.constraints_view(Some(notification))?;
                self.constraints_page(view, status)
            },
            (POST) (/constraints/{id: ConstraintId}) => {
                self.submit_constraint(req, Some(id))
            },
            (GET) (/api/health) => {
                Ok(Response::json(&Health::up()))
            },
            (GET) (/api/schedule) => {
                Ok(Response::json(&ScheduledTask::new(req.get_param("taskName"))))
            },
            (POST) (/api/schedule) => {
                // Like the query string, the form is optional here.
                let task = req.get_param("taskName")
                    .or_else(|| {
                        read_form(req).ok()
                            .and_then(|f| field(&f, "taskName").map(|t| t.to_owned()))
                    });
                Ok(Response::json(&ScheduledTask::new(task)))
            },
            (GET) (/api/predict) => {
                Ok(Response::json(&Prediction::new(req.get_param("input"))))
            },
            _ => {
                let asset_resp = rouille::match_assets(req, "static");
                if asset_resp.is_success() {
                    Ok(asset_resp)
                }
                else {
                    Err(WebError::NotFound)
                }
            }
        )
    }
    fn render_error(&self, req: &Request, err: &WebError) -> Response {
        match err.as_rendered(req, &self.hbs) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to render error page: {}", e);
                Response::text(format!("error: {}\n", err))
                    .with_status_code(err.status_code())
            }
        }
    }
}
