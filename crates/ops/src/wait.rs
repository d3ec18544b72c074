//! Bounded polling until a process instance ends

use crate::exchange::exchange;
use crate::process::flow_state;
use crate::{OpsCtx, WaitOptions, WaitOutcome};
use itpam_errors::{ConfigError, Error};
use itpam_events::{AppEvent, EventEmitter, WaitEvent};
use itpam_net::SoapTransport;
use itpam_soap::{build_get_process_status, SoapResponse};
use itpam_types::{Dataset, InstanceId, ProcessStatus};
use std::time::Duration;

/// Poll the instance until it reaches a terminal status or the budget runs out
///
/// Each round polls once; on a non-terminal status it sleeps for
/// `min(remaining, polling_seconds)` and charges that against the budget.
/// The dataset is read once, from the last response, after the loop exits.
/// A zero budget makes no call and reports a timeout with an empty status.
///
/// # Errors
///
/// Any transport error or fault during polling aborts the wait immediately.
/// A zero polling interval is rejected up front since it would never
/// consume the budget.
pub async fn wait_for_completion<T: SoapTransport>(
    ctx: &OpsCtx<T>,
    roid: &InstanceId,
    options: WaitOptions,
) -> Result<WaitOutcome, Error> {
    if options.polling_seconds == 0 {
        return Err(ConfigError::InvalidValue {
            field: "polling_seconds".to_string(),
            value: "0".to_string(),
        }
        .into());
    }

    // Contents never change between polls
    let request = build_get_process_status(&ctx.credentials, roid)?;

    let mut remaining = options.timeout_seconds;
    let mut status = ProcessStatus::default();
    let mut last_response: Option<SoapResponse> = None;
    let mut completed = false;

    while remaining > 0 {
        let response = exchange(ctx, &request).await?;
        status = flow_state(&response);
        last_response = Some(response);

        ctx.emit(AppEvent::Wait(WaitEvent::Polled {
            roid: roid.to_string(),
            status: status.to_string(),
            remaining_seconds: remaining,
        }));

        if status.is_terminal() {
            completed = true;
            break;
        }

        let sleep_seconds = remaining.min(options.polling_seconds);
        ctx.emit(AppEvent::Wait(WaitEvent::Sleeping {
            roid: roid.to_string(),
            seconds: sleep_seconds,
            remaining_seconds: remaining,
        }));
        tokio::time::sleep(Duration::from_secs(sleep_seconds)).await;
        remaining -= sleep_seconds;
    }

    let dataset = last_response
        .as_ref()
        .map(SoapResponse::params_dataset)
        .unwrap_or_else(Dataset::new);

    ctx.emit(AppEvent::Wait(WaitEvent::Finished {
        roid: roid.to_string(),
        status: status.to_string(),
        completed,
    }));

    Ok(WaitOutcome {
        status,
        dataset,
        completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx, fault, flow_state, ScriptedTransport};
    use itpam_errors::NetworkError;
    use tokio::time::Instant;

    fn options(polling_seconds: u64, timeout_seconds: u64) -> WaitOptions {
        WaitOptions {
            polling_seconds,
            timeout_seconds,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_after_two_sleeps() {
        let transport = ScriptedTransport::new()
            .reply(flow_state("Running"))
            .reply(flow_state("Running"))
            .reply(flow_state("Completed"));

        let start = Instant::now();
        let outcome = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(30, 100))
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(60));
        assert!(outcome.completed);
        assert_eq!(outcome.status.as_str(), "Completed");
        assert_eq!(outcome.dataset.to_lines(), ["x:5"]);
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_with_last_status() {
        let transport = ScriptedTransport::new()
            .reply(flow_state("Running"))
            .reply(flow_state("Running"))
            .reply(flow_state("Running"))
            .reply(flow_state("Waiting"));

        let start = Instant::now();
        let outcome = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(30, 100))
            .await
            .unwrap();

        // 30 + 30 + 30 + 10
        assert_eq!(start.elapsed(), Duration::from_secs(100));
        assert!(!outcome.completed);
        assert_eq!(outcome.status.as_str(), "Waiting");
        assert_eq!(outcome.dataset.to_lines(), ["x:5"]);
        assert_eq!(transport.calls().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_counts_as_completed() {
        let transport = ScriptedTransport::new().reply(flow_state("Failed"));

        let start = Instant::now();
        let outcome = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(30, 100))
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(outcome.completed);
        assert_eq!(outcome.status.as_str(), "Failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fault_aborts_wait() {
        let transport = ScriptedTransport::new()
            .reply(flow_state("Running"))
            .reply_with_status(500, fault("Instance was deleted"))
            .reply(flow_state("Completed"));

        let err = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(30, 100))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Instance was deleted");
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_error_aborts_wait() {
        let transport = ScriptedTransport::new().fail(NetworkError::Connection {
            endpoint: "http://pamserver:8080/itpam".to_string(),
        });

        let err = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(30, 100))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unable to connect to [http://pamserver:8080/itpam]. Please verify host and port."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_makes_no_call() {
        let transport = ScriptedTransport::new();

        let outcome = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(30, 0))
            .await
            .unwrap();

        assert!(!outcome.completed);
        assert_eq!(outcome.status.as_str(), "");
        assert!(outcome.dataset.to_lines().is_empty());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_polling_is_rejected() {
        let transport = ScriptedTransport::new();
        let err = wait_for_completion(&ctx(&transport), &InstanceId::new("42"), options(0, 100))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidValue { .. })));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_wait_events() {
        let transport = ScriptedTransport::new()
            .reply(flow_state("Running"))
            .reply(flow_state("Completed"));
        let (tx, mut rx) = itpam_events::channel();
        let ops = ctx(&transport).with_events(tx);

        wait_for_completion(&ops, &InstanceId::new("42"), options(5, 60))
            .await
            .unwrap();
        drop(ops);

        let mut polled = 0;
        let mut slept = Vec::new();
        let mut finished = None;
        while let Some(event) = rx.recv().await {
            match event {
                AppEvent::Wait(WaitEvent::Polled { .. }) => polled += 1,
                AppEvent::Wait(WaitEvent::Sleeping { seconds, .. }) => slept.push(seconds),
                AppEvent::Wait(WaitEvent::Finished { completed, .. }) => finished = Some(completed),
                _ => {}
            }
        }

        assert_eq!(polled, 2);
        assert_eq!(slept, [5]);
        assert_eq!(finished, Some(true));
    }
}
