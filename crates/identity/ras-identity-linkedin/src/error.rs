//! LinkedIn provider error types.

use ras_identity_core::IdentityError;
use thiserror::Error;

pub type LinkedInResult<T> = Result<T, LinkedInError>;

#[derive(Debug, Error)]
pub enum LinkedInError {
    #[error("Missing profile field: {0}")]
    MissingField(String),

    #[error("Profile field {field} should be {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    #[error("Profile field {0} is not a valid epoch millisecond timestamp")]
    InvalidTimestamp(String),

    #[error("Profile document has no id")]
    MissingSubject,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<LinkedInError> for IdentityError {
    fn from(err: LinkedInError) -> Self {
        match err {
            LinkedInError::Serialization(e) => IdentityError::SerializationError(e),
            other => IdentityError::ProviderError(other.to_string()),
        }
    }
}
