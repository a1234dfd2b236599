//! Standard configuration module.

use serde_derive::Deserialize;
use kmrl_util::{ConfigExt, crate_name};

/// Widest gap allowed between planned services, in minutes.
pub const MAX_PLAN_INTERVAL_MINUTES: i64 = 24 * 60;

fn default_listen() -> String {
    "127.0.0.1:8080".into()
}
fn default_plan_interval() -> i64 {
    kmrl_fahrplan::planner::DEFAULT_STEP_MINUTES
}
fn default_fleet_total() -> u32 { 30 }
fn default_active_routes() -> u32 { 8 }
fn default_daily_passengers() -> u32 { 45230 }
fn default_system_efficiency() -> f64 { 94.2 }

fn default_fleet_ready() -> u32 { 22 }
fn default_fleet_standby() -> u32 { 5 }
fn default_fleet_maintenance() -> u32 { 3 }

/// `kmrl-web` configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Seed for the schedule generators. Random if unset.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Pretend schedule generation takes this long.
    #[serde(default)]
    pub simulated_latency_ms: Option<u64>,
    /// Gap between services on planned (interval) schedules.
    #[serde(default = "default_plan_interval")]
    pub plan_interval_minutes: i64,
    /// Dashboard fleet counts.
    #[serde(default = "default_fleet_total")]
    pub fleet_total: u32,
    #[serde(default = "default_fleet_ready")]
    pub fleet_ready: u32,
    #[serde(default = "default_fleet_standby")]
    pub fleet_standby: u32,
    #[serde(default = "default_fleet_maintenance")]
    pub fleet_maintenance: u32,
    /// Dashboard quick stats.
    #[serde(default = "default_active_routes")]
    pub active_routes: u32,
    #[serde(default = "default_daily_passengers")]
    pub daily_passengers: u32,
    /// Percentage.
    #[serde(default = "default_system_efficiency")]
    pub system_efficiency: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: default_listen(),
            rng_seed: None,
            simulated_latency_ms: None,
            plan_interval_minutes: default_plan_interval(),
            fleet_total: default_fleet_total(),
            fleet_ready: default_fleet_ready(),
            fleet_standby: default_fleet_standby(),
            fleet_maintenance: default_fleet_maintenance(),
            active_routes: default_active_routes(),
            daily_passengers: default_daily_passengers(),
            system_efficiency: default_system_efficiency(),
        }
    }
}

impl Config {
    /// Checks the values serde can't.
    pub fn validate(&self) -> Result<(), failure::Error> {
        let pim = self.plan_interval_minutes;
        if pim < 1 || pim > MAX_PLAN_INTERVAL_MINUTES {
            return Err(failure::err_msg(format!("plan_interval_minutes must be between 1 and {}, not {}",
                                                MAX_PLAN_INTERVAL_MINUTES, pim)));
        }
        Ok(())
    }
}

impl ConfigExt for Config {
    fn crate_name() -> &'static str {
        crate_name!()
    }
}
