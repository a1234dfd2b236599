//! Small JSON endpoints under `/api`.

use serde_derive::Serialize;
use chrono::Utc;
use log::*;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str
}
impl Health {
    pub fn up() -> Self {
        Health { status: "UP" }
    }
}

/// Acknowledgement for a (pretend) scheduled task.
#[derive(Serialize, Debug)]
pub struct ScheduledTask {
    pub task: String,
    pub status: &'static str,
    /// Milliseconds since the Unix epoch.
    pub time: i64
}
impl ScheduledTask {
    pub fn new(task: Option<String>) -> Self {
        let task = task.unwrap_or_else(|| "demo-task".into());
        debug!("scheduling task {}", task);
        ScheduledTask {
            task,
            status: "Scheduled successfully",
            time: Utc::now().timestamp_millis()
        }
    }
}

/// A canned prediction; there's no model behind it.
#[derive(Serialize, Debug)]
pub struct Prediction {
    pub input: String,
    pub prediction: String,
    pub confidence: f64
}
impl Prediction {
    pub fn new(input: Option<String>) -> Self {
        let input = input.unwrap_or_else(|| "test-input".into());
        Prediction {
            prediction: format!("This is a dummy prediction for input: {}", input),
            input,
            confidence: 0.95
        }
    }
}
