mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

/// Environment variables checked, in order, for the Gemini credential.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config = parse(&config_str)?;

    let api_key = API_KEY_VARS.iter().find_map(|var| env::var(var).ok());
    apply_api_key_override(&mut config, api_key);

    if let Ok(db_path) = env::var("QUOTA_DB_PATH") {
        config.server.database_path = db_path;
    }

    validate(&config)?;
    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(config_str)?)
}

pub fn apply_api_key_override(config: &mut Config, api_key: Option<String>) {
    if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
        debug!("Using Gemini API key from environment");
        config.gemini.api_key = key;
    }
}

pub fn validate(config: &Config) -> Result<()> {
    if config.gemini.api_key.trim().is_empty() {
        return Err(Error::config(format!(
            "missing Gemini API key: set gemini.api_key or one of {}",
            API_KEY_VARS.join(", ")
        )));
    }
    if config.gemini.model.trim().is_empty() {
        return Err(Error::config("gemini.model must not be empty"));
    }
    Ok(())
}
