//! Domain-grouped event definitions

mod general;
mod soap;
mod wait;

pub use general::GeneralEvent;
pub use soap::SoapEvent;
pub use wait::WaitEvent;

use crate::EventLevel;
use serde::{Deserialize, Serialize};

/// Top-level event, one variant per domain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    General(GeneralEvent),
    Soap(SoapEvent),
    Wait(WaitEvent),
}

impl AppEvent {
    /// Severity used when the CLI turns the event into a log record
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            AppEvent::General(event) => event.level(),
            AppEvent::Soap(event) => event.level(),
            AppEvent::Wait(event) => event.level(),
        }
    }
}
