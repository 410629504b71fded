//! Storage-specific error types for the hosted REST store.
//!
//! These wrap transport errors (reqwest, JSON) and are converted to the
//! storage-agnostic `pledgewall_core::Error` before leaving this crate.

use pledgewall_core::errors::Error;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP client error (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response returned by the store
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The store answered successfully but with an unusable body
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Client misconfiguration (bad key, bad URL)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorResponse {
    pub fn describe(&self) -> String {
        let mut text = match &self.code {
            Some(code) => format!("{}: {}", code, self.message),
            None => self.message.clone(),
        };
        if let Some(details) = &self.details {
            text.push_str(&format!(" ({})", details));
        }
        if let Some(hint) = &self.hint {
            text.push_str(&format!(" hint: {}", hint));
        }
        text
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Config(e) => Error::Unexpected(e),
            other => Error::Repository(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_postgrest_error() {
        let body = r#"{"code":"23505","details":"Key (email)=(a@b.c) already exists.","hint":null,"message":"duplicate key value violates unique constraint"}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.describe(),
            "23505: duplicate key value violates unique constraint (Key (email)=(a@b.c) already exists.)"
        );
    }

    #[test]
    fn test_store_error_maps_to_repository_error() {
        let core: Error = StoreError::api(503, "upstream down").into();
        assert!(matches!(core, Error::Repository(msg) if msg.contains("503")));
    }
}
