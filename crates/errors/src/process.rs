//! Process input error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ProcessError {
    #[error("invalid parameter '{input}': expected name:value")]
    InvalidParameter { input: String },
}

impl UserFacingError for ProcessError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { .. } => Some("Pass parameters as name:value, e.g. --param env:prod"),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidParameter { .. } => "process.invalid_parameter",
        })
    }
}
