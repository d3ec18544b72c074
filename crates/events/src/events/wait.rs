use crate::EventLevel;
use serde::{Deserialize, Serialize};

/// Progress of the wait-for-completion loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WaitEvent {
    /// One status poll finished
    Polled {
        roid: String,
        status: String,
        remaining_seconds: u64,
    },

    /// The loop is about to sleep before the next poll
    Sleeping {
        roid: String,
        seconds: u64,
        remaining_seconds: u64,
    },

    /// The loop exited
    Finished {
        roid: String,
        status: String,
        completed: bool,
    },
}

impl WaitEvent {
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            Self::Polled { .. } | Self::Sleeping { .. } => EventLevel::Debug,
            Self::Finished { completed: true, .. } => EventLevel::Info,
            Self::Finished { completed: false, .. } => EventLevel::Warn,
        }
    }
}
