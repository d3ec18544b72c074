//! Starting process instances and reading their state

use crate::exchange::exchange;
use crate::{OpsCtx, ProcessState};
use itpam_errors::Error;
use itpam_events::EventEmitter;
use itpam_net::SoapTransport;
use itpam_soap::{build_execute_process, build_get_process_status, SoapResponse};
use itpam_types::{InstanceId, ProcessParam, ProcessStatus};

/// Start the process at `process_path` with the given parameters
///
/// Returns the instance ROID read from the first `ROID` element of the
/// response.
///
/// # Errors
///
/// Returns a network error if the server cannot be reached, or
/// `SoapError::RemoteFault` if the server answers with a fault. A blank path
/// is sent as is and left for the server to reject.
pub async fn start_process<T: SoapTransport>(
    ctx: &OpsCtx<T>,
    process_path: &str,
    params: &[ProcessParam],
) -> Result<InstanceId, Error> {
    let request = build_execute_process(&ctx.credentials, process_path, params)?;
    let response = exchange(ctx, &request).await?;
    let roid = response.first_text("ROID");
    if roid.is_empty() {
        ctx.emit_warning(format!("no ROID in response to starting [{process_path}]"));
    }
    Ok(InstanceId::new(roid))
}

/// Read the state and dataset of a process instance
///
/// # Errors
///
/// Returns a network error if the server cannot be reached, or
/// `SoapError::RemoteFault` if the server answers with a fault.
pub async fn get_process_status<T: SoapTransport>(
    ctx: &OpsCtx<T>,
    roid: &InstanceId,
) -> Result<ProcessState, Error> {
    let request = build_get_process_status(&ctx.credentials, roid)?;
    let response = exchange(ctx, &request).await?;
    Ok(ProcessState {
        status: flow_state(&response),
        dataset: response.params_dataset(),
    })
}

pub(crate) fn flow_state(response: &SoapResponse) -> ProcessStatus {
    ProcessStatus::new(response.first_text("flow-state"))
}
