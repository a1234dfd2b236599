//! View types handed to the handlebars templates.

pub mod constraints;
pub mod dashboard;
pub mod not_found;
pub mod notification;
pub mod schedules;
pub mod user_error;
