//! Bits shared by every kmrl crate.
//!
//! - the `crate_name!` and `impl_from_for_error!` macros
//! - config loading (`ConfigExt`)
//! - logging setup
//! - HTTP server plumbing (`http`)
//! - schedule time arithmetic (`time`)

pub mod http;
pub mod time;

use config as cfg;
use serde::de::DeserializeOwned;
use log::*;

/// Prefix for environment variables that override config values, and for
/// `KMRL_LOG`.
pub const ENV_PREFIX: &str = "KMRL";

/// Name of the crate this is expanded in (e.g. `kmrl_web`).
#[macro_export]
macro_rules! crate_name {
    () => {module_path!().split("::").next().unwrap_or("kmrl")}
}

/// Writes `From` impls that wrap each source error in an enum variant.
#[macro_export]
macro_rules! impl_from_for_error {
    ($error:ident, $($orig:ident => $var:ident),*) => {
        $(
            impl From<$orig> for $error {
                fn from(err: $orig) -> $error {
                    $error::$var(err)
                }
            }
         )*
    }
}

/// Extension trait for crate configuration structs.
///
/// Values come from `[crate name].toml` in the working directory (if it
/// exists), then `KMRL_*` environment variables on top. Fields missing
/// from both need a `#[serde(default)]`.
pub trait ConfigExt: DeserializeOwned {
    fn crate_name() -> &'static str;
    fn load() -> Result<Self, failure::Error> {
        Self::load_from(Self::crate_name(), ENV_PREFIX)
    }
    /// Loads from `[file].toml` and `[env_prefix]_*` variables.
    fn load_from(file: &str, env_prefix: &str) -> Result<Self, failure::Error> {
        info!("Loading config from {}.toml and {}_* variables", file, env_prefix);
        let mut settings = cfg::Config::default();
        settings.merge(cfg::File::with_name(file).required(false))?;
        settings.merge(cfg::Environment::with_prefix(env_prefix))?;
        let ret = settings.try_into()?;
        Ok(ret)
    }
}

/// Parses a log level name, as found in `KMRL_LOG`.
pub fn parse_log_level(name: Option<&str>) -> log::LevelFilter {
    name.and_then(|l| l.trim().parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

/// Initialize logging.
///
/// Logs go to stdout at `Info` unless `KMRL_LOG` says otherwise. The HTTP
/// server's own chatter is held to warnings; `kmrl_util::http` writes its
/// own access log.
pub fn setup_logging() -> Result<(), failure::Error> {
    let var = std::env::var(format!("{}_LOG", ENV_PREFIX)).ok();
    let level = parse_log_level(var.as_ref().map(|s| s as &str));
    fern::Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!("{} [{} {}] {}",
                                    chrono::Local::now().format("%H:%M:%S"),
                                    record.target(),
                                    record.level(),
                                    msg))
        })
        .level(level)
        .level_for("tiny_http", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    debug!("Logging at {}", level);
    Ok(())
}
