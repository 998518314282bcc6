use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while configuring a picker. Nothing here is guessed or
/// silently replaced with a fallback.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Unknown size profile: {0} (expected compact, medium or cozy)")]
    UnknownSize(String),

    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, serde_json::Error),
}

/// Rejected date input supplied by the host. The picker state is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Date {0} is outside the supported range")]
    OutOfRange(NaiveDate),
}

impl InputError {
    pub fn invalid_date(input: impl Into<String>, reason: impl ToString) -> Self {
        InputError::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
