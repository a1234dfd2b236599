use serde_derive::Serialize;
use kmrl_fahrplan::types::*;

use crate::forms::{Form, field};
use crate::templates::notification::NotificationView;

fn val(form: &Form, name: &str) -> String {
    field(form, name).unwrap_or("").to_owned()
}

#[derive(Serialize)]
pub struct DepotFormView {
    pub action: String,
    pub submit_label: &'static str,
    pub editing: bool,
    pub train_id: String,
    pub fitness_date: String,
    pub job_card_status: String,
    pub branding_priority: String,
    pub mileage: String,
    pub cleaning_slot: String,
    pub stabling_position: String
}
impl DepotFormView {
    fn with_action(action: Option<ConstraintId>) -> Self {
        DepotFormView {
            action: action_url(action),
            submit_label: submit_label(action),
            editing: action.is_some(),
            train_id: String::new(),
            fitness_date: String::new(),
            job_card_status: String::new(),
            branding_priority: String::new(),
            mileage: String::new(),
            cleaning_slot: String::new(),
            stabling_position: String::new()
        }
    }
    pub fn blank() -> Self {
        Self::with_action(None)
    }
    pub fn from_form(form: &Form, editing: Option<ConstraintId>) -> Self {
        DepotFormView {
            train_id: val(form, "trainId"),
            fitness_date: val(form, "fitnessDate"),
            job_card_status: val(form, "jobCardStatus"),
            branding_priority: val(form, "brandingPriority"),
            mileage: val(form, "mileage"),
            cleaning_slot: val(form, "cleaningSlot"),
            stabling_position: val(form, "stablingPosition"),
            ..Self::with_action(editing)
        }
    }
    pub fn from_constraint(id: ConstraintId, d: &DepotConstraint) -> Self {
        DepotFormView {
            train_id: d.train_id.clone(),
            fitness_date: d.fitness_date.clone(),
            job_card_status: d.job_card_status.clone(),
            branding_priority: d.branding_priority.clone(),
            mileage: d.mileage.clone(),
            cleaning_slot: d.cleaning_slot.clone(),
            stabling_position: d.stabling_position.clone(),
            ..Self::with_action(Some(id))
        }
    }
}

#[derive(Serialize)]
pub struct SeverityOption {
    pub value: &'static str,
    pub selected: bool
}
fn severity_options(selected: Option<Severity>) -> Vec<SeverityOption> {
    [Severity::Low, Severity::Medium, Severity::High, Severity::Critical].iter()
        .map(|s| SeverityOption {
            value: s.as_str(),
            selected: Some(*s) == selected
        })
        .collect()
}

#[derive(Serialize)]
pub struct OperationalFormView {
    pub action: String,
    pub submit_label: &'static str,
    pub editing: bool,
    pub constraint_type: String,
    pub route: String,
    pub start_date: String,
    pub end_date: String,
    pub severities: Vec<SeverityOption>,
    pub description: String,
    pub notify_passengers: bool
}
impl OperationalFormView {
    fn with_action(action: Option<ConstraintId>) -> Self {
        OperationalFormView {
            action: action_url(action),
            submit_label: submit_label(action),
            editing: action.is_some(),
            constraint_type: String::new(),
            route: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            severities: severity_options(None),
            description: String::new(),
            notify_passengers: false
        }
    }
    pub fn blank() -> Self {
        Self::with_action(None)
    }
    pub fn from_form(form: &Form, editing: Option<ConstraintId>) -> Self {
        let severity = field(form, "severity").and_then(|s| s.parse().ok());
        OperationalFormView {
            constraint_type: val(form, "constraintType"),
            route: val(form, "route"),
            start_date: val(form, "startDate"),
            end_date: val(form, "endDate"),
            severities: severity_options(severity),
            description: val(form, "description"),
            notify_passengers: form.contains_key("notifyPassengers"),
            ..Self::with_action(editing)
        }
    }
    pub fn from_constraint(id: ConstraintId, o: &OperationalConstraint) -> Self {
        OperationalFormView {
            constraint_type: o.constraint_type.clone(),
            route: o.route.clone(),
            start_date: o.start_date.clone(),
            end_date: o.end_date.clone(),
            severities: severity_options(Some(o.severity)),
            description: o.description.clone(),
            notify_passengers: o.notify_passengers,
            ..Self::with_action(Some(id))
        }
    }
}

fn action_url(id: Option<ConstraintId>) -> String {
    match id {
        Some(id) => format!("/constraints/{}", id),
        None => "/constraints".into()
    }
}
fn submit_label(id: Option<ConstraintId>) -> &'static str {
    if id.is_some() { "Update constraint" } else { "Add constraint" }
}

#[derive(Serialize)]
pub struct DepotRow {
    pub id: ConstraintId,
    pub train_id: String,
    pub fitness_date: String,
    pub job_card_status: String,
    pub branding_priority: String,
    pub mileage: String,
    pub cleaning_slot: String,
    pub stabling_position: String
}
#[derive(Serialize)]
pub struct OperationalRow {
    pub id: ConstraintId,
    pub constraint_type: String,
    pub route: String,
    pub start_date: String,
    pub end_date: String,
    pub severity: &'static str,
    pub severity_color: &'static str,
    pub description: String,
    pub notify_passengers: bool
}

#[derive(Serialize)]
pub struct ConstraintsView {
    pub notifications: Vec<NotificationView>,
    pub depot_form: DepotFormView,
    pub operational_form: OperationalFormView,
    pub depot_rows: Vec<DepotRow>,
    pub operational_rows: Vec<OperationalRow>,
    pub count: usize
}
impl ConstraintsView {
    /// Lays out the constraint book, with blank forms.
    pub fn new<'a, I>(constraints: I, notification: Option<NotificationView>) -> Self
        where I: IntoIterator<Item = &'a Constraint> {
        let mut depot_rows = vec![];
        let mut operational_rows = vec![];
        for c in constraints {
            match c.details {
                ConstraintDetails::Depot(ref d) => depot_rows.push(DepotRow {
                    id: c.id,
                    train_id: d.train_id.clone(),
                    fitness_date: d.fitness_date.clone(),
                    job_card_status: d.job_card_status.clone(),
                    branding_priority: d.branding_priority.clone(),
                    mileage: d.mileage.clone(),
                    cleaning_slot: d.cleaning_slot.clone(),
                    stabling_position: d.stabling_position.clone()
                }),
                ConstraintDetails::Operational(ref o) => operational_rows.push(OperationalRow {
                    id: c.id,
                    constraint_type: o.constraint_type.clone(),
                    route: o.route.clone(),
                    start_date: o.start_date.clone(),
                    end_date: o.end_date.clone(),
                    severity: o.severity.as_str(),
                    severity_color: o.severity.color(),
                    description: o.description.clone(),
                    notify_passengers: o.notify_passengers
                })
            }
        }
        ConstraintsView {
            notifications: notification.into_iter().collect(),
            depot_form: DepotFormView::blank(),
            operational_form: OperationalFormView::blank(),
            count: depot_rows.len() + operational_rows.len(),
            depot_rows,
            operational_rows
        }
    }
}
