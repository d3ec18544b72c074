#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for itpam
//!
//! This crate posts SOAP envelopes to the server and hands the raw reply
//! back. It knows nothing about what the envelopes mean; faults and body
//! decoding are the caller's business.

mod client;

pub use client::{NetConfig, SoapClient};

use async_trait::async_trait;
use itpam_errors::Error;
use itpam_soap::SoapRequest;
use itpam_types::Endpoint;

/// Raw HTTP reply to a SOAP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapReply {
    pub http_status: u16,
    pub body: String,
}

impl SoapReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_status)
    }
}

/// Something that can deliver a SOAP request to an endpoint
///
/// One attempt per call; there is no retry policy at this layer.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Send `request` to `endpoint`'s SOAP URL and return the reply
    ///
    /// The body is returned for any HTTP status, since servers report
    /// faults with status 500.
    async fn call(&self, endpoint: &Endpoint, request: &SoapRequest) -> Result<SoapReply, Error>;
}

#[async_trait]
impl<T: SoapTransport + ?Sized> SoapTransport for &T {
    async fn call(&self, endpoint: &Endpoint, request: &SoapRequest) -> Result<SoapReply, Error> {
        (**self).call(endpoint, request).await
    }
}
