use super::descriptor::{self, ActionDescriptor, CATEGORY};
use super::{Action, ActionResult, ConnectionInputs};
use crate::get_process_status;
use async_trait::async_trait;
use itpam_errors::Error;
use itpam_events::EventSender;
use itpam_net::SoapTransport;
use itpam_types::InstanceId;
use tracing::info;

pub(super) static DESCRIPTOR: ActionDescriptor = ActionDescriptor {
    name: "PAM - Get Process Status",
    description: "Gets the status and dataset of a CA Process Automation process instance",
    category: CATEGORY,
    inputs: &[
        descriptor::USERNAME,
        descriptor::PASSWORD,
        descriptor::DOMAIN_URL,
        descriptor::INSTANCE_ROID_IN,
    ],
    outputs: &[descriptor::INSTANCE_STATUS, descriptor::INSTANCE_DATASET],
};

/// Read the status and dataset of one instance
#[derive(Debug, Clone)]
pub struct GetProcessStatusAction {
    pub connection: ConnectionInputs,
    pub roid: InstanceId,
}

impl GetProcessStatusAction {
    #[must_use]
    pub fn new(connection: ConnectionInputs, roid: impl Into<InstanceId>) -> Self {
        Self {
            connection,
            roid: roid.into(),
        }
    }
}

#[async_trait]
impl Action for GetProcessStatusAction {
    fn descriptor(&self) -> &'static ActionDescriptor {
        &DESCRIPTOR
    }

    async fn try_execute<T: SoapTransport>(
        &self,
        transport: &T,
        events: Option<&EventSender>,
    ) -> Result<ActionResult, Error> {
        let ctx = self.connection.context(transport, events)?;
        let state = get_process_status(&ctx, &self.roid).await?;

        let message = format!(
            "Status for Process Instance [{}] on [{}] is: {}",
            self.roid, ctx.endpoint, state.status
        );
        info!("{message}");
        Ok(ActionResult::success(message)
            .with_text(descriptor::INSTANCE_STATUS.name, state.status.as_str())
            .with_dataset(descriptor::INSTANCE_DATASET.name, &state.dataset))
    }
}
