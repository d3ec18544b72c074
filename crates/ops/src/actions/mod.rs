//! Action boundary
//!
//! Each action takes plain string inputs the way a host would supply them,
//! runs one operation, and folds every outcome (including errors) into an
//! [`ActionResult`]. Nothing propagates past [`Action::execute`].

mod check_status;
pub mod descriptor;
mod process_status;
mod start_process;
mod wait_process_end;

pub use check_status::CheckServerStatusAction;
pub use descriptor::{ActionDescriptor, ParameterDescriptor, ParameterKind, CATEGORY};
pub use process_status::GetProcessStatusAction;
pub use start_process::StartProcessAction;
pub use wait_process_end::WaitForProcessEndAction;

use crate::OpsCtx;
use async_trait::async_trait;
use itpam_errors::Error;
use itpam_events::{EventEmitter, EventSender};
use itpam_net::SoapTransport;
use itpam_types::{Credentials, Dataset, Endpoint, Secret};
use serde::Serialize;

/// Connection inputs shared by every action
#[derive(Debug, Clone)]
pub struct ConnectionInputs {
    pub domain_url: String,
    pub username: String,
    pub password: Secret,
}

impl ConnectionInputs {
    #[must_use]
    pub fn new(
        domain_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<Secret>,
    ) -> Self {
        Self {
            domain_url: domain_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build an operations context over `transport`
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::InvalidUrl` if the domain URL is not http(s).
    pub fn context<T: SoapTransport>(
        &self,
        transport: T,
        events: Option<&EventSender>,
    ) -> Result<OpsCtx<T>, Error> {
        let endpoint = Endpoint::parse(&self.domain_url)?;
        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        let ctx = OpsCtx::new(transport, endpoint, credentials);
        Ok(match events {
            Some(tx) => ctx.with_events(tx.clone()),
            None => ctx,
        })
    }
}

/// Value of one output field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    Text(String),
    List(Vec<String>),
}

/// One populated output field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutput {
    pub name: &'static str,
    pub value: OutputValue,
}

/// Pass/fail flag, message and populated outputs of one action run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    pub outputs: Vec<ActionOutput>,
}

impl ActionResult {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            outputs: Vec::new(),
        }
    }

    /// Failed result; outputs stay empty
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.outputs.push(ActionOutput {
            name,
            value: OutputValue::Text(value.into()),
        });
        self
    }

    #[must_use]
    pub fn with_dataset(mut self, name: &'static str, dataset: &Dataset) -> Self {
        self.outputs.push(ActionOutput {
            name,
            value: OutputValue::List(dataset.to_lines()),
        });
        self
    }

    /// Value of the output called `name`, if populated
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&OutputValue> {
        self.outputs
            .iter()
            .find(|output| output.name == name)
            .map(|output| &output.value)
    }

    /// Text value of the output called `name`
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.output(name) {
            Some(OutputValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// List value of the output called `name`
    #[must_use]
    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.output(name) {
            Some(OutputValue::List(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One host-facing action
#[async_trait]
pub trait Action: Send + Sync {
    /// Static description of inputs and outputs
    fn descriptor(&self) -> &'static ActionDescriptor;

    /// Run the operation, propagating errors
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying operation returns.
    async fn try_execute<T: SoapTransport>(
        &self,
        transport: &T,
        events: Option<&EventSender>,
    ) -> Result<ActionResult, Error>;

    /// Run the operation and fold any error into a failed result
    async fn execute<T: SoapTransport>(
        &self,
        transport: &T,
        events: Option<&EventSender>,
    ) -> ActionResult {
        let name = self.descriptor().name;
        events.emit_operation_started(name);

        match self.try_execute(transport, events).await {
            Ok(result) => {
                events.emit_operation_completed(name, result.success);
                result
            }
            Err(e) => {
                tracing::error!(action = name, error = %e, "action failed");
                events.emit_operation_failed(name, e.to_string());
                ActionResult::failure(e.to_string())
            }
        }
    }
}

/// Descriptors of every action, in catalog order
#[must_use]
pub fn all_descriptors() -> [&'static ActionDescriptor; 4] {
    [
        &check_status::DESCRIPTOR,
        &start_process::DESCRIPTOR,
        &process_status::DESCRIPTOR,
        &wait_process_end::DESCRIPTOR,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_no_outputs() {
        let result = ActionResult::failure("boom");
        assert!(!result.success);
        assert_eq!(result.message, "boom");
        assert!(result.outputs.is_empty());
    }

    #[test]
    fn test_output_lookup() {
        let mut dataset = Dataset::new();
        dataset.push("x", "5");
        let result = ActionResult::success("ok")
            .with_text("Server Status", "Running")
            .with_dataset("Process Instance Dataset", &dataset);

        assert_eq!(result.text("Server Status"), Some("Running"));
        assert_eq!(
            result.list("Process Instance Dataset"),
            Some(&["x:5".to_string()][..])
        );
        assert!(result.text("Process Instance Dataset").is_none());
        assert!(result.output("Missing").is_none());
    }

    #[test]
    fn test_result_json_shape() {
        let result = ActionResult::success("ok").with_text("Server Status", "Running");
        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["outputs"][0]["name"], "Server Status");
        assert_eq!(value["outputs"][0]["value"], "Running");
    }

    #[test]
    fn test_catalog() {
        let names: Vec<_> = all_descriptors().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "PAM - Check Server Status",
                "PAM - Start Process",
                "PAM - Get Process Status",
                "PAM - Wait For Process End",
            ]
        );
        assert!(all_descriptors().iter().all(|d| d.category == CATEGORY));
    }

    #[test]
    fn test_invalid_domain_url() {
        struct Never;

        #[async_trait]
        impl SoapTransport for Never {
            async fn call(
                &self,
                _endpoint: &Endpoint,
                _request: &itpam_soap::SoapRequest,
            ) -> Result<itpam_net::SoapReply, Error> {
                unreachable!("no call expected")
            }
        }

        let inputs = ConnectionInputs::new("pamserver:8080", "user", "pw");
        assert!(inputs.context(Never, None).is_err());
    }
}
