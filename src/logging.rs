// src/logging.rs
// DOCUMENTATION: Logger initialization
// PURPOSE: Configure env_logger from RUST_LOG or the configured level

use crate::config::Config;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Filter string handed to env_logger when RUST_LOG is not set
pub fn default_filter(config: &Config) -> String {
    if config.log_level.is_empty() {
        DEFAULT_FILTER.to_string()
    } else {
        format!("{},sqlx=warn", config.log_level)
    }
}

/// Initialize logging once; later calls are ignored
pub fn init_logging(config: &Config) {
    let env = env_logger::Env::default().default_filter_or(default_filter(config));

    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
