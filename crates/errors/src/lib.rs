#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the itpam client
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling across the
//! event channel and the action boundary.

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod network;
pub mod process;
pub mod soap;

// Re-export all error types at the root
pub use config::ConfigError;
pub use network::NetworkError;
pub use process::ProcessError;
pub use soap::SoapError;

/// Generic error type for cross-crate boundaries
///
/// The `Network`, `Soap` and `Process` variants are transparent so that the
/// message reported back to the caller is exactly the domain error text.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Soap(#[from] SoapError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is a SOAP fault reported by the remote server
    #[must_use]
    pub fn is_remote_fault(&self) -> bool {
        matches!(self, Self::Soap(SoapError::RemoteFault { .. }))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias for itpam operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Network(err) => err.user_message(),
            Error::Soap(err) => err.user_message(),
            Error::Process(err) => err.user_message(),
            Error::Config(err) => err.user_message(),
            Error::Internal(_) => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_hint(),
            Error::Soap(err) => err.user_hint(),
            Error::Process(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Internal(_) => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(err) => err.is_retryable(),
            Error::Soap(err) => err.is_retryable(),
            Error::Process(_) | Error::Config(_) | Error::Internal(_) => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Network(err) => err.user_code(),
            Error::Soap(err) => err.user_code(),
            Error::Process(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_messages_are_not_wrapped() {
        let err: Error = SoapError::RemoteFault {
            fault_string: "Invalid credentials".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(err.is_remote_fault());

        let err: Error = NetworkError::Transport("HTTP 404".into()).into();
        assert_eq!(err.to_string(), "SOAP Call Exception: HTTP 404");
        assert!(!err.is_remote_fault());
    }

    #[test]
    fn test_config_errors_keep_prefix() {
        let err: Error = ConfigError::MissingField {
            field: "domain_url".into(),
        }
        .into();
        assert_eq!(err.to_string(), "config error: missing required field: domain_url");
        assert_eq!(err.user_code(), Some("config.missing_field"));
    }
}
