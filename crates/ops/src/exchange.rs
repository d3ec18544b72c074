//! One request/response round trip with fault handling

use crate::OpsCtx;
use itpam_errors::{Error, NetworkError, SoapError};
use itpam_events::{AppEvent, EventEmitter, SoapEvent};
use itpam_net::SoapTransport;
use itpam_soap::{SoapRequest, SoapResponse};

/// Send `request` and decode the reply
///
/// A `Fault` in the body wins over the HTTP status. A non-2xx reply
/// without a fault is a transport error, as is a non-2xx reply whose body
/// is not a SOAP envelope at all.
pub(crate) async fn exchange<T: SoapTransport>(
    ctx: &OpsCtx<T>,
    request: &SoapRequest,
) -> Result<SoapResponse, Error> {
    let url = ctx.endpoint.soap_url();
    let action = request.action.header_value();

    ctx.emit(AppEvent::Soap(SoapEvent::RequestSent {
        url: url.clone(),
        action: action.to_string(),
    }));

    let reply = ctx.transport.call(&ctx.endpoint, request).await?;

    ctx.emit(AppEvent::Soap(SoapEvent::ResponseReceived {
        url,
        action: action.to_string(),
        http_status: reply.http_status,
        bytes: reply.body.len(),
    }));

    let response = match SoapResponse::parse(&reply.body) {
        Ok(response) => response,
        Err(e) if !reply.is_success() => {
            ctx.emit_debug(format!(
                "HTTP {} reply is not a SOAP envelope: {e}",
                reply.http_status
            ));
            return Err(http_status_error(reply.http_status));
        }
        Err(e) => return Err(e),
    };

    if let Some(fault_string) = response.fault() {
        ctx.emit(AppEvent::Soap(SoapEvent::FaultReceived {
            action: action.to_string(),
            fault_string: fault_string.clone(),
        }));
        return Err(SoapError::RemoteFault { fault_string }.into());
    }

    if !reply.is_success() {
        return Err(http_status_error(reply.http_status));
    }

    Ok(response)
}

fn http_status_error(status: u16) -> Error {
    NetworkError::Transport(format!("HTTP {status}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx, envelope, ScriptedTransport};
    use itpam_events::GeneralEvent;
    use itpam_soap::build_check_server_status;

    #[tokio::test]
    async fn test_non_soap_error_page_is_http_error() {
        let transport =
            ScriptedTransport::new().reply_with_status(502, "<html><body>Bad Gateway</body></html>");
        let (tx, mut rx) = itpam_events::channel();
        let ops = ctx(&transport).with_events(tx);

        let request = build_check_server_status(&ops.credentials).unwrap();
        let err = exchange(&ops, &request).await.unwrap_err();
        drop(ops);

        assert_eq!(err.to_string(), "SOAP Call Exception: HTTP 502");
        let mut debug_logs = Vec::new();
        while let Some(event) = rx.recv().await {
            if let AppEvent::General(GeneralEvent::DebugLog { message }) = event {
                debug_logs.push(message);
            }
        }
        assert_eq!(debug_logs.len(), 1);
        assert!(debug_logs[0].starts_with("HTTP 502 reply is not a SOAP envelope"));
    }

    #[tokio::test]
    async fn test_http_error_without_fault() {
        let transport = ScriptedTransport::new().reply_with_status(503, envelope("<busy/>"));
        let ops = ctx(&transport);
        let request = build_check_server_status(&ops.credentials).unwrap();
        let err = exchange(&ops, &request).await.unwrap_err();
        assert_eq!(err.to_string(), "SOAP Call Exception: HTTP 503");
    }
}
