use super::descriptor::{self, ActionDescriptor, CATEGORY};
use super::{Action, ActionResult, ConnectionInputs};
use crate::check_server_status;
use async_trait::async_trait;
use itpam_errors::Error;
use itpam_events::EventSender;
use itpam_net::SoapTransport;
use tracing::info;

pub(super) static DESCRIPTOR: ActionDescriptor = ActionDescriptor {
    name: "PAM - Check Server Status",
    description: "Checks the status of a CA Process Automation server",
    category: CATEGORY,
    inputs: &[
        descriptor::USERNAME,
        descriptor::PASSWORD,
        descriptor::DOMAIN_URL,
    ],
    outputs: &[descriptor::SERVER_STATUS],
};

/// Query the server status
#[derive(Debug, Clone)]
pub struct CheckServerStatusAction {
    pub connection: ConnectionInputs,
}

impl CheckServerStatusAction {
    #[must_use]
    pub fn new(connection: ConnectionInputs) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl Action for CheckServerStatusAction {
    fn descriptor(&self) -> &'static ActionDescriptor {
        &DESCRIPTOR
    }

    async fn try_execute<T: SoapTransport>(
        &self,
        transport: &T,
        events: Option<&EventSender>,
    ) -> Result<ActionResult, Error> {
        let ctx = self.connection.context(transport, events)?;
        let status = check_server_status(&ctx).await?;

        let message = format!("Status of [{}]: {status}", ctx.endpoint);
        info!("{message}");
        Ok(ActionResult::success(message).with_text(descriptor::SERVER_STATUS.name, status))
    }
}
