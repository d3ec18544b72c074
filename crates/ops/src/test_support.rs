//! Scripted transport for driving operations without a server

use async_trait::async_trait;
use itpam_errors::Error;
use itpam_net::{SoapReply, SoapTransport};
use itpam_soap::{SoapAction, SoapRequest};
use itpam_types::{Credentials, Endpoint};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::OpsCtx;

pub(crate) const DOMAIN_URL: &str = "http://pamserver:8080/itpam";

/// Replies handed out in order, one per call
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<SoapReply, Error>>>,
    calls: Mutex<Vec<SoapAction>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, body: impl Into<String>) -> Self {
        self.reply_with_status(200, body)
    }

    pub(crate) fn reply_with_status(self, http_status: u16, body: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(SoapReply {
            http_status,
            body: body.into(),
        }));
        self
    }

    pub(crate) fn fail(self, error: impl Into<Error>) -> Self {
        self.replies.lock().unwrap().push_back(Err(error.into()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<SoapAction> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoapTransport for ScriptedTransport {
    async fn call(&self, _endpoint: &Endpoint, request: &SoapRequest) -> Result<SoapReply, Error> {
        self.calls.lock().unwrap().push(request.action);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::internal("no scripted reply left")))
    }
}

pub(crate) fn ctx(transport: &ScriptedTransport) -> OpsCtx<&ScriptedTransport> {
    OpsCtx::new(
        transport,
        Endpoint::parse(DOMAIN_URL).unwrap(),
        Credentials::new("pamadmin", "secret"),
    )
}

pub(crate) fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"#
    )
}

pub(crate) fn flow_state(status: &str) -> String {
    envelope(&format!(
        r#"<ns:getFlowStateResponse xmlns:ns="http://www.ca.com/itpam"><ns:flow-state>{status}</ns:flow-state><ns:params><ns:param name="x">5</ns:param></ns:params></ns:getFlowStateResponse>"#
    ))
}

pub(crate) fn fault(fault_string: &str) -> String {
    envelope(&format!(
        "<soapenv:Fault><faultcode>soapenv:Server</faultcode><faultstring>{fault_string}</faultstring></soapenv:Fault>"
    ))
}
