use crate::EventLevel;
use serde::{Deserialize, Serialize};

/// Request/response traffic with the SOAP endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SoapEvent {
    /// An envelope was posted
    RequestSent { url: String, action: String },

    /// A response body was received, fault or not
    ResponseReceived {
        url: String,
        action: String,
        http_status: u16,
        bytes: usize,
    },

    /// The response carried a `Fault` element
    FaultReceived { action: String, fault_string: String },
}

impl SoapEvent {
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::RequestSent { .. } | Self::ResponseReceived { .. } => EventLevel::Debug,
            Self::FaultReceived { .. } => EventLevel::Warn,
        }
    }
}
