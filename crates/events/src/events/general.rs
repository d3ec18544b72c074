use crate::EventLevel;
use serde::{Deserialize, Serialize};

/// General utility events for warnings, debug output and operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    /// Generic warning message
    Warning { message: String },

    /// Debug logging
    DebugLog { message: String },

    /// Generic operation started notification
    OperationStarted { operation: String },

    /// Generic operation completion with success status
    OperationCompleted { operation: String, success: bool },

    /// Generic operation failure with error details
    OperationFailed { operation: String, error: String },
}

impl GeneralEvent {
    pub fn debug(message: impl Into<String>) -> Self {
        Self::DebugLog {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::DebugLog { .. } => EventLevel::Debug,
            Self::Warning { .. } => EventLevel::Warn,
            Self::OperationFailed { .. } => EventLevel::Error,
            Self::OperationStarted { .. } => EventLevel::Info,
            Self::OperationCompleted { success, .. } => {
                if *success {
                    EventLevel::Info
                } else {
                    EventLevel::Warn
                }
            }
        }
    }
}
