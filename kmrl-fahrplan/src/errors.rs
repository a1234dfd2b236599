//! Error handling.

use failure_derive::Fail;
use kmrl_util::http::StatusCode;
use std::fmt;

use crate::types::{ConstraintId, NotificationLevel};

/// Which end of a generation range a problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End
}
impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end")
        }
    }
}

/// Error that could occur when generating schedules or editing constraints.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum FahrplanError {
    /// A range boundary was absent or blank.
    #[fail(display = "missing {} boundary", _0)]
    MissingInput(Boundary),
    /// The end of an interval isn't strictly after its start.
    #[fail(display = "end {} is not after start {}", end, start)]
    InvalidRange {
        start: String,
        end: String
    },
    /// A boundary couldn't be interpreted as a date or date/time.
    #[fail(display = "couldn't parse {} boundary {:?}", field, value)]
    UnparseableInput {
        field: Boundary,
        value: String
    },
    /// The range would produce more records than one request may ask for.
    #[fail(display = "range of {} {} is over the limit of {}", requested, unit, limit)]
    RangeTooLarge {
        requested: i64,
        limit: i64,
        unit: &'static str
    },
    /// The interval step isn't a positive duration.
    #[fail(display = "interval step of {} minutes is not positive", _0)]
    InvalidStep(i64),
    /// No constraint with that ID exists.
    #[fail(display = "constraint {} not found", _0)]
    ConstraintNotFound(ConstraintId),
    /// A required constraint field was blank.
    #[fail(display = "constraint field '{}' is required", _0)]
    ConstraintFieldMissing(&'static str),
    /// A constraint field held something we don't recognise.
    #[fail(display = "constraint field '{}' has invalid value {:?}", field, value)]
    InvalidConstraintField {
        field: &'static str,
        value: String
    }
}

impl FahrplanError {
    /// The message shown to the dashboard user.
    pub fn user_message(&self) -> String {
        use self::FahrplanError::*;

        match *self {
            MissingInput(_) => "Please select both start and end dates.".into(),
            InvalidRange { .. } => "End must be after Start.".into(),
            UnparseableInput { .. } => "Invalid date/time format.".into(),
            RangeTooLarge { limit, unit, .. } => {
                format!("That range is too large; ask for at most {} {} at a time.", limit, unit)
            },
            InvalidStep(_) => "The schedule interval must be at least one minute.".into(),
            ConstraintNotFound(_) => "That constraint no longer exists.".into(),
            ConstraintFieldMissing(f) => format!("Please fill in the {} field.", f),
            InvalidConstraintField { field, .. } => format!("Please choose a valid {}.", field)
        }
    }
    /// How loudly the dashboard should shout about this.
    pub fn level(&self) -> NotificationLevel {
        use self::FahrplanError::*;

        match *self {
            MissingInput(_) | ConstraintFieldMissing(_) => NotificationLevel::Warning,
            _ => NotificationLevel::Danger
        }
    }
}

impl StatusCode for FahrplanError {
    fn status_code(&self) -> u16 {
        use self::FahrplanError::*;

        match *self {
            ConstraintNotFound(_) => 404,
            InvalidStep(_) => 500,
            _ => 400
        }
    }
}

pub type FahrplanResult<T> = ::std::result::Result<T, FahrplanError>;
