use super::descriptor::{self, ActionDescriptor, CATEGORY};
use super::{Action, ActionResult, ConnectionInputs};
use crate::{wait_for_completion, WaitOptions};
use async_trait::async_trait;
use itpam_errors::Error;
use itpam_events::EventSender;
use itpam_net::SoapTransport;
use itpam_types::InstanceId;
use tracing::{info, warn};

pub(super) static DESCRIPTOR: ActionDescriptor = ActionDescriptor {
    name: "PAM - Wait For Process End",
    description: "Waits for a CA Process Automation process instance to end",
    category: CATEGORY,
    inputs: &[
        descriptor::USERNAME,
        descriptor::PASSWORD,
        descriptor::DOMAIN_URL,
        descriptor::INSTANCE_ROID_IN,
        descriptor::POLLING_SECONDS,
        descriptor::TIMEOUT_SECONDS,
    ],
    outputs: &[descriptor::INSTANCE_STATUS, descriptor::INSTANCE_DATASET],
};

/// Poll an instance until it ends or the timeout elapses
#[derive(Debug, Clone)]
pub struct WaitForProcessEndAction {
    pub connection: ConnectionInputs,
    pub roid: InstanceId,
    pub options: WaitOptions,
}

impl WaitForProcessEndAction {
    #[must_use]
    pub fn new(connection: ConnectionInputs, roid: impl Into<InstanceId>) -> Self {
        Self {
            connection,
            roid: roid.into(),
            options: WaitOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl Action for WaitForProcessEndAction {
    fn descriptor(&self) -> &'static ActionDescriptor {
        &DESCRIPTOR
    }

    async fn try_execute<T: SoapTransport>(
        &self,
        transport: &T,
        events: Option<&EventSender>,
    ) -> Result<ActionResult, Error> {
        let ctx = self.connection.context(transport, events)?;
        let outcome = wait_for_completion(&ctx, &self.roid, self.options).await?;

        // Status and dataset are reported on timeout too
        let result = if outcome.completed {
            let message = format!(
                "Process Instance [{}] on [{}] ended with status: {}",
                self.roid, ctx.endpoint, outcome.status
            );
            info!("{message}");
            ActionResult::success(message)
        } else {
            let message = format!(
                "Process Instance [{}] on [{}] did not end within [{}] seconds timeout period.  Last status was: {}",
                self.roid, ctx.endpoint, self.options.timeout_seconds, outcome.status
            );
            warn!("{message}");
            ActionResult::failure(message)
        };

        Ok(result
            .with_text(descriptor::INSTANCE_STATUS.name, outcome.status.as_str())
            .with_dataset(descriptor::INSTANCE_DATASET.name, &outcome.dataset))
    }
}
