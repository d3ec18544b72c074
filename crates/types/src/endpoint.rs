//! Server endpoint addressing

use itpam_errors::{Error, NetworkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Suffix appended to the domain URL to reach the SOAP service
pub const SOAP_PATH: &str = "/soap";

/// Base URL of a server, e.g. `http://pamserver:8080/itpam`
///
/// The text is kept as the user wrote it; it is what error messages show
/// and what the SOAP path is appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint {
    raw: String,
}

impl Endpoint {
    /// Parse and validate a domain URL
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an absolute http(s) URL.
    pub fn parse(domain_url: &str) -> Result<Self, Error> {
        let trimmed = domain_url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| NetworkError::InvalidUrl(format!("{trimmed}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme '{}'",
                parsed.scheme()
            ))
            .into());
        }
        Ok(Self {
            raw: trimmed.to_string(),
        })
    }

    /// The domain URL as configured
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Target URL for SOAP calls
    #[must_use]
    pub fn soap_url(&self) -> String {
        format!("{}{SOAP_PATH}", self.raw)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Endpoint> for String {
    fn from(value: Endpoint) -> Self {
        value.raw
    }
}
