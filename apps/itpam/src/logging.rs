//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields.
//! Nothing here ever sees the password; events carry only URLs, actions,
//! statuses and sizes.

use itpam_events::{AppEvent, GeneralEvent, SoapEvent, WaitEvent};
use tracing::{debug, error, info, trace, warn, Level};

/// Emit one tracing record at a level only known at runtime
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::ERROR => error!($($arg)+),
            Level::WARN => warn!($($arg)+),
            Level::INFO => info!($($arg)+),
            Level::DEBUG => debug!($($arg)+),
            Level::TRACE => trace!($($arg)+),
        }
    };
}

/// Log an `AppEvent` at the level the event declares, with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    let level = Level::from(event.level());
    match event {
        AppEvent::General(general) => log_general(level, general),
        AppEvent::Soap(soap) => log_soap(level, soap),
        AppEvent::Wait(wait) => log_wait(level, wait),
    }
}

fn log_general(level: Level, event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message } => log_at!(level, message = %message, "Warning"),
        GeneralEvent::DebugLog { message } => log_at!(level, message = %message, "Debug log"),
        GeneralEvent::OperationStarted { operation } => {
            log_at!(level, operation = %operation, "Operation started");
        }
        GeneralEvent::OperationCompleted { operation, success } => {
            log_at!(level, operation = %operation, success, "Operation completed");
        }
        GeneralEvent::OperationFailed { operation, error } => {
            log_at!(level, operation = %operation, error = %error, "Operation failed");
        }
    }
}

fn log_soap(level: Level, event: &SoapEvent) {
    match event {
        SoapEvent::RequestSent { url, action } => {
            log_at!(level, url = %url, action = %action, "SOAP request sent");
        }
        SoapEvent::ResponseReceived {
            url,
            action,
            http_status,
            bytes,
        } => {
            log_at!(
                level,
                url = %url,
                action = %action,
                http_status = http_status,
                bytes = bytes,
                "SOAP response received"
            );
        }
        SoapEvent::FaultReceived {
            action,
            fault_string,
        } => {
            log_at!(level, action = %action, fault = %fault_string, "SOAP fault received");
        }
    }
}

fn log_wait(level: Level, event: &WaitEvent) {
    match event {
        WaitEvent::Polled {
            roid,
            status,
            remaining_seconds,
        } => {
            log_at!(
                level,
                roid = %roid,
                status = %status,
                remaining_seconds = remaining_seconds,
                "Polled process instance"
            );
        }
        WaitEvent::Sleeping {
            roid,
            seconds,
            remaining_seconds,
        } => {
            log_at!(
                level,
                roid = %roid,
                seconds = seconds,
                remaining_seconds = remaining_seconds,
                "Sleeping before next poll"
            );
        }
        WaitEvent::Finished {
            roid,
            status,
            completed,
        } => {
            let message = if *completed {
                "Process instance ended"
            } else {
                "Wait timed out"
            };
            log_at!(level, roid = %roid, status = %status, completed, "{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted records in memory
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(event: &AppEvent) -> String {
        let output = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(output.clone())
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || log_event_with_tracing(event));
        let bytes = output.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_record_level_follows_event_level() {
        let timed_out = AppEvent::Wait(WaitEvent::Finished {
            roid: "42".into(),
            status: "Running".into(),
            completed: false,
        });
        let line = capture(&timed_out);
        assert!(line.contains("WARN"), "{line}");
        assert!(line.contains("Wait timed out"), "{line}");

        let failed = AppEvent::General(GeneralEvent::OperationFailed {
            operation: "PAM - Start Process".into(),
            error: "Login failed".into(),
        });
        let line = capture(&failed);
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("Login failed"), "{line}");

        let sent = AppEvent::Soap(SoapEvent::RequestSent {
            url: "http://pam:8080/itpam/soap".into(),
            action: "GetFlowState".into(),
        });
        assert!(capture(&sent).contains("DEBUG"));
    }
}
