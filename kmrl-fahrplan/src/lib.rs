//! Demo schedule generation for the KMRL operations dashboard.
//!
//! Fabricates train schedules (either randomly across a date range, or
//! deterministically at a fixed interval between two timestamps), feeds the
//! dashboard calendar, and keeps the in-memory book of operational
//! constraints.

pub mod errors;
pub mod types;
pub mod pools;
pub mod rng;
pub mod generate;
pub mod calendar;
pub mod constraints;
pub mod planner;
pub mod hhmm;
#[cfg(test)]
mod tests;

pub use crate::errors::{FahrplanError, FahrplanResult};
pub use crate::rng::{RandomSource, SeededRandom};
pub use crate::planner::{Planner, ScheduleBoard};
pub use crate::constraints::ConstraintBook;
