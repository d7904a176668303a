use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable config
/// pointed at the public Overpass and OSRM instances.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        Ok(secs)
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must not be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("CVFINDER_ENV", "development"));
    let bind_addr = parse_addr("CVFINDER_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("CVFINDER_LOG_LEVEL", "info");
    let static_dir = PathBuf::from(or_default("CVFINDER_STATIC_DIR", "./fe"));

    let overpass_url = non_empty("OVERPASS_URL", DEFAULT_OVERPASS_URL)?;
    let osrm_url = non_empty("OSRM_URL", DEFAULT_OSRM_URL)?;
    let overpass_timeout_secs = parse_secs("CVFINDER_OVERPASS_TIMEOUT_SECS", "30")?;
    let osrm_timeout_secs = parse_secs("CVFINDER_OSRM_TIMEOUT_SECS", "20")?;
    let user_agent = non_empty("CVFINDER_USER_AGENT", "cvfinder/0.1 (convenience-finder)")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        static_dir,
        overpass_url,
        osrm_url,
        overpass_timeout_secs,
        osrm_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
