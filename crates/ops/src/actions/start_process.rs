use super::descriptor::{self, ActionDescriptor, CATEGORY};
use super::{Action, ActionResult, ConnectionInputs};
use crate::start_process;
use async_trait::async_trait;
use itpam_errors::Error;
use itpam_events::EventSender;
use itpam_net::SoapTransport;
use itpam_types::ProcessParam;
use tracing::info;

pub(super) static DESCRIPTOR: ActionDescriptor = ActionDescriptor {
    name: "PAM - Start Process",
    description: "Starts a CA Process Automation process",
    category: CATEGORY,
    inputs: &[
        descriptor::USERNAME,
        descriptor::PASSWORD,
        descriptor::DOMAIN_URL,
        descriptor::PROCESS_PATH,
        descriptor::PROCESS_PARAMS,
    ],
    outputs: &[descriptor::INSTANCE_ROID_OUT],
};

/// Start a process with `name:value` parameters
#[derive(Debug, Clone)]
pub struct StartProcessAction {
    pub connection: ConnectionInputs,
    pub process_path: String,
    /// Raw `name:value` strings, parsed on execute
    pub params: Vec<String>,
}

impl StartProcessAction {
    #[must_use]
    pub fn new(
        connection: ConnectionInputs,
        process_path: impl Into<String>,
        params: Vec<String>,
    ) -> Self {
        Self {
            connection,
            process_path: process_path.into(),
            params,
        }
    }
}

#[async_trait]
impl Action for StartProcessAction {
    fn descriptor(&self) -> &'static ActionDescriptor {
        &DESCRIPTOR
    }

    async fn try_execute<T: SoapTransport>(
        &self,
        transport: &T,
        events: Option<&EventSender>,
    ) -> Result<ActionResult, Error> {
        let params = ProcessParam::parse_all(&self.params)?;
        let ctx = self.connection.context(transport, events)?;
        let roid = start_process(&ctx, &self.process_path, &params).await?;

        let message = format!(
            "Process [{}] started on [{}] with Instance ROID: {roid}",
            self.process_path, ctx.endpoint
        );
        info!("{message}");
        Ok(ActionResult::success(message)
            .with_text(descriptor::INSTANCE_ROID_OUT.name, roid.as_str()))
    }
}
