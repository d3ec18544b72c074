//! reqwest-backed SOAP transport

use crate::{SoapReply, SoapTransport};
use async_trait::async_trait;
use itpam_config::NetworkConfig;
use itpam_errors::{Error, NetworkError};
use itpam_soap::SoapRequest;
use itpam_types::Endpoint;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self::from(&NetworkConfig::default())
    }
}

impl From<&NetworkConfig> for NetConfig {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
            user_agent: format!("itpam/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client posting SOAP envelopes
#[derive(Clone)]
pub struct SoapClient {
    client: Client,
}

impl SoapClient {
    /// Create a new SOAP client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: &NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(&NetConfig::default())
    }

    /// Map a failed send onto the error kinds callers report
    fn map_send_error(endpoint: &Endpoint, error: &reqwest::Error) -> Error {
        if error.is_connect() {
            NetworkError::Connection {
                endpoint: endpoint.to_string(),
            }
            .into()
        } else if error.is_builder() {
            NetworkError::InvalidUrl(error.to_string()).into()
        } else {
            NetworkError::Transport(error.to_string()).into()
        }
    }
}

#[async_trait]
impl SoapTransport for SoapClient {
    async fn call(&self, endpoint: &Endpoint, request: &SoapRequest) -> Result<SoapReply, Error> {
        let url = endpoint.soap_url();
        debug!(url = %url, action = %request.action, "posting SOAP request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", request.action.header_value())
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| Self::map_send_error(endpoint, &e))?;

        let http_status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        debug!(url = %url, http_status, bytes = body.len(), "received SOAP reply");
        Ok(SoapReply { http_status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_config_from_network_config() {
        let network = NetworkConfig {
            timeout: 12,
            connect_timeout: 3,
        };
        let config = NetConfig::from(&network);
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(config.user_agent.starts_with("itpam/"));
    }

    #[test]
    fn test_reply_success_range() {
        let ok = SoapReply {
            http_status: 200,
            body: String::new(),
        };
        let fault = SoapReply {
            http_status: 500,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!fault.is_success());
    }
}
