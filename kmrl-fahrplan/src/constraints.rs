//! The constraint book: operational constraints entered on the dashboard.

use chrono::prelude::*;
use log::*;

use crate::errors::{FahrplanError, FahrplanResult};
use crate::types::*;

fn require_field(value: &str, name: &'static str) -> FahrplanResult<()> {
    if value.trim().is_empty() {
        Err(FahrplanError::ConstraintFieldMissing(name))
    }
    else {
        Ok(())
    }
}

impl ConstraintDetails {
    /// Checks every required field has something in it.
    pub fn validate(&self) -> FahrplanResult<()> {
        match *self {
            ConstraintDetails::Depot(ref d) => {
                require_field(&d.train_id, "train ID")?;
                require_field(&d.fitness_date, "fitness date")?;
                require_field(&d.job_card_status, "job card status")?;
                require_field(&d.branding_priority, "branding priority")?;
                require_field(&d.mileage, "mileage")?;
                require_field(&d.cleaning_slot, "cleaning slot")?;
                require_field(&d.stabling_position, "stabling position")?;
            },
            ConstraintDetails::Operational(ref o) => {
                require_field(&o.constraint_type, "constraint type")?;
                require_field(&o.route, "route")?;
                require_field(&o.start_date, "start date")?;
                require_field(&o.end_date, "end date")?;
            }
        }
        Ok(())
    }
}

/// Ordered, in-memory collection of constraints.
///
/// IDs are creation timestamps in milliseconds, bumped where necessary so
/// they stay unique and strictly increasing.
#[derive(Debug, Default)]
pub struct ConstraintBook {
    entries: Vec<Constraint>,
    last_id: ConstraintId
}

impl ConstraintBook {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds a constraint, stamped with the current time.
    pub fn add(&mut self, details: ConstraintDetails) -> FahrplanResult<ConstraintId> {
        self.add_at(details, Utc::now())
    }
    /// Adds a constraint as if it were created at `now`.
    pub fn add_at(&mut self, details: ConstraintDetails, now: DateTime<Utc>) -> FahrplanResult<ConstraintId> {
        details.validate()?;
        let id = std::cmp::max(now.timestamp_millis(), self.last_id + 1);
        self.last_id = id;
        info!("Adding constraint #{}", id);
        self.entries.push(Constraint {
            id,
            created_at: now,
            details
        });
        Ok(id)
    }
    pub fn get(&self, id: ConstraintId) -> Option<&Constraint> {
        self.entries.iter().find(|c| c.id == id)
    }
    /// Swaps the details of an existing constraint, keeping its ID, creation
    /// time and position.
    pub fn replace(&mut self, id: ConstraintId, details: ConstraintDetails) -> FahrplanResult<()> {
        details.validate()?;
        let entry = self.entries.iter_mut()
            .find(|c| c.id == id)
            .ok_or(FahrplanError::ConstraintNotFound(id))?;
        info!("Replacing constraint #{}", id);
        entry.details = details;
        Ok(())
    }
    /// Deletes a constraint, handing it back.
    pub fn remove(&mut self, id: ConstraintId) -> FahrplanResult<Constraint> {
        let pos = self.entries.iter()
            .position(|c| c.id == id)
            .ok_or(FahrplanError::ConstraintNotFound(id))?;
        info!("Removing constraint #{}", id);
        Ok(self.entries.remove(pos))
    }
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.entries.iter()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
