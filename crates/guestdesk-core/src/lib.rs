mod app_config;
mod cache;
mod config;
mod dates;
mod orders;

pub use app_config::{AppConfig, Environment, MissingIdPolicy};
pub use cache::OrderCache;
pub use config::{load_app_config, load_app_config_from_env};
pub use dates::parse_date_time;
pub use orders::{CanonicalOrder, OrderLine, OrderTotals};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
