//! Web dashboard for KMRL train operations: schedules, the calendar, and
//! the constraint book.

pub mod api;
pub mod errors;
pub mod config;
pub mod ctx;
pub mod forms;
pub mod tmpl;
pub mod templates;

use log::*;
use kmrl_util::ConfigExt;

use crate::config::Config;
use crate::ctx::App;
use crate::errors::*;

fn main() -> Result<()> {
    kmrl_util::setup_logging()?;
    info!("kmrl-web starting");
    info!("loading config");
    let cfg = Config::load()?;
    info!("initialising Handlebars");
    let hbs = tmpl::handlebars_init()?;
    let app = App::new(&cfg, hbs)?;
    kmrl_util::http::start_server(&cfg.listen, app)
}
