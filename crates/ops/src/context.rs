//! Operations context for dependency injection

use itpam_events::{EventEmitter, EventSender};
use itpam_net::SoapTransport;
use itpam_types::{Credentials, Endpoint};

/// Everything a single remote operation needs
///
/// The context is cheap to build and holds no state between calls; each
/// action constructs one, runs, and drops it.
pub struct OpsCtx<T> {
    /// Transport used to deliver envelopes
    pub transport: T,
    /// Server the envelopes go to
    pub endpoint: Endpoint,
    /// Auth block written into every envelope
    pub credentials: Credentials,
    /// Event sender for progress reporting
    pub tx: Option<EventSender>,
}

impl<T: SoapTransport> OpsCtx<T> {
    #[must_use]
    pub fn new(transport: T, endpoint: Endpoint, credentials: Credentials) -> Self {
        Self {
            transport,
            endpoint,
            credentials,
            tx: None,
        }
    }

    /// Attach an event channel
    #[must_use]
    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }
}

impl<T> EventEmitter for OpsCtx<T> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}
