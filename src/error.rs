use crate::request::ValidationError;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The message shown to users for every backend failure.
pub const BACKEND_ERROR_MESSAGE: &str =
    "Failed to fetch medicine information. Please check your input and try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Image upload limit reached, next upload available at {unlock_at}")]
    QuotaExceeded { unlock_at: DateTime<Utc> },

    #[error("{}", BACKEND_ERROR_MESSAGE)]
    Backend,

    #[error("A request is already in progress")]
    Busy,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for the failures a user can act on directly (bad input, quota, busy).
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::QuotaExceeded { .. } | Self::Backend | Self::Busy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_displays_only_the_generic_message() {
        assert_eq!(Error::Backend.to_string(), BACKEND_ERROR_MESSAGE);
    }

    #[test]
    fn internal_errors_are_not_user_facing() {
        assert!(!Error::internal("boom").is_user_facing());
        assert!(!Error::llm("status 500").is_user_facing());
        assert!(Error::Busy.is_user_facing());
        assert!(Error::Validation(ValidationError::MissingAge).is_user_facing());
    }
}
