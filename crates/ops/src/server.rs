//! Server status query

use crate::exchange::exchange;
use crate::OpsCtx;
use itpam_errors::Error;
use itpam_net::SoapTransport;
use itpam_soap::build_check_server_status;

/// Ask the server for its status
///
/// Returns the text of the first `serverStatus` element in the response,
/// whatever its namespace prefix; empty if the element is absent.
///
/// # Errors
///
/// Returns a network error if the server cannot be reached, or
/// `SoapError::RemoteFault` if the server answers with a fault.
pub async fn check_server_status<T: SoapTransport>(ctx: &OpsCtx<T>) -> Result<String, Error> {
    let request = build_check_server_status(&ctx.credentials)?;
    let response = exchange(ctx, &request).await?;
    Ok(response.first_text("serverStatus"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx, envelope, fault, ScriptedTransport};
    use itpam_soap::SoapAction;

    #[tokio::test]
    async fn test_reads_status_under_any_prefix() {
        let transport = ScriptedTransport::new().reply(envelope(
            r#"<a:checkServerStatusResponse xmlns:a="urn:x"><a:serverStatus>Active</a:serverStatus></a:checkServerStatusResponse>"#,
        ));

        let status = check_server_status(&ctx(&transport)).await.unwrap();

        assert_eq!(status, "Active");
        assert_eq!(transport.calls(), [SoapAction::CheckServerStatus]);
    }

    #[tokio::test]
    async fn test_missing_status_is_empty() {
        let transport = ScriptedTransport::new().reply(envelope("<ok/>"));
        let status = check_server_status(&ctx(&transport)).await.unwrap();
        assert_eq!(status, "");
    }

    #[tokio::test]
    async fn test_fault_wins_over_http_status() {
        let transport =
            ScriptedTransport::new().reply_with_status(500, fault("Authentication failed"));

        let err = check_server_status(&ctx(&transport)).await.unwrap_err();

        assert!(err.is_remote_fault());
        assert_eq!(err.to_string(), "Authentication failed");
    }

    #[tokio::test]
    async fn test_http_error_without_fault() {
        let transport = ScriptedTransport::new().reply_with_status(503, "Service Unavailable");
        let err = check_server_status(&ctx(&transport)).await.unwrap_err();
        assert_eq!(err.to_string(), "SOAP Call Exception: HTTP 503");
    }
}
