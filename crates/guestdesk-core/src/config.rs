use crate::app_config::{AppConfig, Environment, MissingIdPolicy};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("GUESTDESK_ENV", "development"));
    let log_level = or_default("GUESTDESK_LOG_LEVEL", "info");
    let orders_max_depth = parse_usize("GUESTDESK_ORDERS_MAX_DEPTH", "5")?;
    let orders_missing_id =
        parse_missing_id_policy(&or_default("GUESTDESK_ORDERS_MISSING_ID", "generate"))?;
    let orders_sample_len = parse_usize("GUESTDESK_ORDERS_SAMPLE_LEN", "240")?;

    Ok(AppConfig {
        env,
        log_level,
        orders_max_depth,
        orders_missing_id,
        orders_sample_len,
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

fn parse_missing_id_policy(s: &str) -> Result<MissingIdPolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "generate" => Ok(MissingIdPolicy::Generate),
        "drop" => Ok(MissingIdPolicy::Drop),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GUESTDESK_ORDERS_MISSING_ID".to_string(),
            reason: format!("expected \"generate\" or \"drop\", got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
