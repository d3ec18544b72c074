//! SOAP codec and protocol error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum SoapError {
    /// A `Fault` element was present in the response body
    #[error("{fault_string}")]
    RemoteFault { fault_string: String },

    #[error("malformed SOAP response: {0}")]
    MalformedResponse(String),

    #[error("failed to encode SOAP request: {0}")]
    Encode(String),
}

impl UserFacingError for SoapError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::RemoteFault { .. } => {
                Some("The server rejected the request; check credentials and inputs.")
            }
            Self::MalformedResponse(_) => Some("Make sure the domain URL points at the itpam root."),
            Self::Encode(_) => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::RemoteFault { .. } => "soap.fault",
            Self::MalformedResponse(_) => "soap.malformed",
            Self::Encode(_) => "soap.encode",
        })
    }
}
