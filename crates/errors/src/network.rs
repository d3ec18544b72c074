//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum NetworkError {
    /// The server could not be reached at all (connection refused, DNS, ...)
    #[error("Unable to connect to [{endpoint}]. Please verify host and port.")]
    Connection { endpoint: String },

    /// Any other transport-layer failure
    #[error("SOAP Call Exception: {0}")]
    Transport(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Connection { .. } => {
                Some("Check the domain URL, e.g. http://pamserver:8080/itpam")
            }
            Self::InvalidUrl(_) => Some("Use an absolute http(s) URL for the domain."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Transport(_))
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::Connection { .. } => "network.connection",
            Self::Transport(_) => "network.transport",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::ClientBuild(_) => "network.client_build",
        })
    }
}
