#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! SOAP codec for the itpam web service
//!
//! Builds SOAP 1.1 request envelopes in the `itp` namespace and decodes
//! responses by element local name, so callers never depend on which
//! prefix or namespace URI the server chose.

mod envelope;
mod response;

pub use envelope::{
    build_check_server_status, build_execute_process, build_get_process_status, SoapRequest,
};
pub use response::SoapResponse;

use serde::{Deserialize, Serialize};
use std::fmt;

/// SOAP 1.1 envelope namespace
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Prefix used for the SOAP envelope elements
pub const SOAP_ENV_PREFIX: &str = "SOAP-ENV";

/// itpam service namespace
pub const ITPAM_NS: &str = "http://www.ca.com/itpam";

/// Prefix bound to [`ITPAM_NS`] in every request
pub const ITPAM_PREFIX: &str = "itp";

/// Value of the `SOAPAction` header for each remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoapAction {
    CheckServerStatus,
    ExecuteFlow,
    GetFlowState,
}

impl SoapAction {
    #[must_use]
    pub fn header_value(self) -> &'static str {
        match self {
            Self::CheckServerStatus => "checkServerStatus",
            Self::ExecuteFlow => "ExecuteC2OFlow",
            Self::GetFlowState => "GetFlowState",
        }
    }
}

impl fmt::Display for SoapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}
