//! Reading submitted forms.

use std::collections::HashMap;
use rouille::Request;
use kmrl_fahrplan::FahrplanError;
use kmrl_fahrplan::types::*;

use crate::errors::*;

/// A submitted `application/x-www-form-urlencoded` body.
pub type Form = HashMap<String, String>;

pub fn read_form(req: &Request) -> WebResult<Form> {
    let input = rouille::input::post::raw_urlencoded_post_input(req)
        .map_err(|e| WebError::BadForm(e.to_string()))?;
    Ok(input.into_iter().collect())
}

/// Looks up a field, if it was submitted at all.
pub fn field<'a>(form: &'a Form, name: &str) -> Option<&'a str> {
    form.get(name).map(|s| s as &str)
}

fn text(form: &Form, name: &str) -> String {
    field(form, name).map(|s| s.trim().to_owned()).unwrap_or_default()
}

/// Builds constraint details from either of the two constraint forms.
pub fn details_from_form(form: &Form) -> WebResult<ConstraintDetails> {
    match field(form, "kind").unwrap_or("depot") {
        "depot" => {
            Ok(ConstraintDetails::Depot(DepotConstraint {
                train_id: text(form, "trainId"),
                fitness_date: text(form, "fitnessDate"),
                job_card_status: text(form, "jobCardStatus"),
                branding_priority: text(form, "brandingPriority"),
                mileage: text(form, "mileage"),
                cleaning_slot: text(form, "cleaningSlot"),
                stabling_position: text(form, "stablingPosition")
            }))
        },
        "operational" => {
            let severity = text(form, "severity");
            if severity.is_empty() {
                return Err(FahrplanError::ConstraintFieldMissing("severity").into());
            }
            let severity = severity.parse::<Severity>()
                .map_err(|_| FahrplanError::InvalidConstraintField {
                    field: "severity",
                    value: severity.clone()
                })?;
            Ok(ConstraintDetails::Operational(OperationalConstraint {
                constraint_type: text(form, "constraintType"),
                route: text(form, "route"),
                start_date: text(form, "startDate"),
                end_date: text(form, "endDate"),
                severity,
                description: text(form, "description"),
                notify_passengers: form.contains_key("notifyPassengers")
            }))
        },
        other => Err(WebError::BadForm(format!("unknown constraint kind {:?}", other)))
    }
}
