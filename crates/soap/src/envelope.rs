//! Request envelope construction

use crate::{SoapAction, ITPAM_NS, ITPAM_PREFIX, SOAP_ENV_NS, SOAP_ENV_PREFIX};
use itpam_errors::{Error, SoapError};
use itpam_types::{Credentials, InstanceId, ProcessParam};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// A ready-to-send envelope and the action header that goes with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    pub action: SoapAction,
    pub body: String,
}

/// `itp:checkServerStatus` with an auth block
///
/// # Errors
///
/// Returns `SoapError::Encode` if the XML writer fails.
pub fn build_check_server_status(credentials: &Credentials) -> Result<SoapRequest, Error> {
    let mut w = EnvelopeWriter::begin()?;
    w.open("checkServerStatus")?;
    w.auth(credentials)?;
    w.close("checkServerStatus")?;
    w.finish(SoapAction::CheckServerStatus)
}

/// `itp:executeProcess` starting the flow at `process_path`
///
/// Parameters are written in the given order as `itp:param` children of
/// `itp:params`, each with an unprefixed `name` attribute.
///
/// # Errors
///
/// Returns `SoapError::Encode` if the XML writer fails.
pub fn build_execute_process(
    credentials: &Credentials,
    process_path: &str,
    params: &[ProcessParam],
) -> Result<SoapRequest, Error> {
    let mut w = EnvelopeWriter::begin()?;
    w.open("executeProcess")?;
    w.open("flow")?;
    w.leaf("name", process_path)?;
    w.leaf("action", "start")?;
    w.auth(credentials)?;
    w.open("params")?;
    for param in params {
        w.param(&param.name, &param.value)?;
    }
    w.close("params")?;
    w.close("flow")?;
    w.close("executeProcess")?;
    w.finish(SoapAction::ExecuteFlow)
}

/// `itp:getProcessStatus` checking the flow instance `roid`
///
/// # Errors
///
/// Returns `SoapError::Encode` if the XML writer fails.
pub fn build_get_process_status(
    credentials: &Credentials,
    roid: &InstanceId,
) -> Result<SoapRequest, Error> {
    let mut w = EnvelopeWriter::begin()?;
    w.open("getProcessStatus")?;
    w.open("flow")?;
    w.leaf("ROID", roid.as_str())?;
    w.leaf("action", "check")?;
    w.auth(credentials)?;
    w.close("flow")?;
    w.close("getProcessStatus")?;
    w.finish(SoapAction::GetFlowState)
}

/// Thin wrapper writing `itp:`-qualified elements inside an open Body
struct EnvelopeWriter {
    writer: Writer<Vec<u8>>,
}

fn encode_err(e: impl std::fmt::Display) -> Error {
    SoapError::Encode(e.to_string()).into()
}

fn env_tag(local: &str) -> String {
    format!("{SOAP_ENV_PREFIX}:{local}")
}

fn itp_tag(local: &str) -> String {
    format!("{ITPAM_PREFIX}:{local}")
}

impl EnvelopeWriter {
    fn begin() -> Result<Self, Error> {
        let mut writer = Writer::new(Vec::new());

        let env_xmlns = format!("xmlns:{SOAP_ENV_PREFIX}");
        let itp_xmlns = format!("xmlns:{ITPAM_PREFIX}");
        let envelope = BytesStart::new(env_tag("Envelope"))
            .with_attributes([(env_xmlns.as_str(), SOAP_ENV_NS), (itp_xmlns.as_str(), ITPAM_NS)]);

        writer
            .write_event(Event::Start(envelope))
            .map_err(encode_err)?;
        writer
            .write_event(Event::Empty(BytesStart::new(env_tag("Header"))))
            .map_err(encode_err)?;
        writer
            .write_event(Event::Start(BytesStart::new(env_tag("Body"))))
            .map_err(encode_err)?;

        Ok(Self { writer })
    }

    fn open(&mut self, local: &str) -> Result<(), Error> {
        self.writer
            .write_event(Event::Start(BytesStart::new(itp_tag(local))))
            .map_err(encode_err)
    }

    fn close(&mut self, local: &str) -> Result<(), Error> {
        self.writer
            .write_event(Event::End(BytesEnd::new(itp_tag(local))))
            .map_err(encode_err)
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        if text.is_empty() {
            return Ok(());
        }
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(encode_err)
    }

    fn leaf(&mut self, local: &str, text: &str) -> Result<(), Error> {
        self.open(local)?;
        self.text(text)?;
        self.close(local)
    }

    fn param(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let start = BytesStart::new(itp_tag("param")).with_attributes([("name", name)]);
        self.writer
            .write_event(Event::Start(start))
            .map_err(encode_err)?;
        self.text(value)?;
        self.close("param")
    }

    fn auth(&mut self, credentials: &Credentials) -> Result<(), Error> {
        self.open("auth")?;
        self.leaf("user", &credentials.username)?;
        self.leaf("password", credentials.password.expose())?;
        self.close("auth")
    }

    fn finish(mut self, action: SoapAction) -> Result<SoapRequest, Error> {
        self.writer
            .write_event(Event::End(BytesEnd::new(env_tag("Body"))))
            .map_err(encode_err)?;
        self.writer
            .write_event(Event::End(BytesEnd::new(env_tag("Envelope"))))
            .map_err(encode_err)?;

        let body = String::from_utf8(self.writer.into_inner()).map_err(encode_err)?;
        Ok(SoapRequest { action, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("pamadmin", "s3cr<t")
    }

    #[test]
    fn test_check_server_status_envelope() {
        let request = build_check_server_status(&creds()).unwrap();
        assert_eq!(request.action, SoapAction::CheckServerStatus);
        assert_eq!(
            request.body,
            "<SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\" \
             xmlns:itp=\"http://www.ca.com/itpam\"><SOAP-ENV:Header/><SOAP-ENV:Body>\
             <itp:checkServerStatus><itp:auth><itp:user>pamadmin</itp:user>\
             <itp:password>s3cr&lt;t</itp:password></itp:auth></itp:checkServerStatus>\
             </SOAP-ENV:Body></SOAP-ENV:Envelope>"
        );
    }

    #[test]
    fn test_execute_process_params_in_order() {
        let params = vec![ProcessParam::new("a", "1"), ProcessParam::new("b", "2")];
        let request = build_execute_process(&creds(), "/Deploy/Run", &params).unwrap();
        assert_eq!(request.action, SoapAction::ExecuteFlow);
        assert!(request.body.contains(
            "<itp:flow><itp:name>/Deploy/Run</itp:name><itp:action>start</itp:action>"
        ));
        assert!(request.body.contains(
            "<itp:params><itp:param name=\"a\">1</itp:param><itp:param name=\"b\">2</itp:param></itp:params>"
        ));
    }

    #[test]
    fn test_execute_process_without_params() {
        let request = build_execute_process(&creds(), "/Deploy/Run", &[]).unwrap();
        assert!(request.body.contains("<itp:params></itp:params>"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let params = vec![ProcessParam::new("q\"x", "a&b")];
        let request = build_execute_process(&creds(), "/p", &params).unwrap();
        assert!(request.body.contains("name=\"q&quot;x\">a&amp;b</itp:param>"));
    }

    #[test]
    fn test_get_process_status_envelope() {
        let request = build_get_process_status(&creds(), &InstanceId::new("12345")).unwrap();
        assert_eq!(request.action, SoapAction::GetFlowState);
        assert!(request.body.contains(
            "<itp:getProcessStatus><itp:flow><itp:ROID>12345</itp:ROID><itp:action>check</itp:action><itp:auth>"
        ));
    }
}
