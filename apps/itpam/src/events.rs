//! Event handling and progress display

use crate::logging::log_event_with_tracing;
use console::{Style, Term};
use itpam_events::{AppEvent, WaitEvent};

/// Logs every event and shows wait progress on stderr
pub struct EventHandler {
    term: Term,
    show_progress: bool,
    dim: Style,
}

impl EventHandler {
    /// Create new event handler
    ///
    /// Progress lines are suppressed entirely in JSON mode so stdout and
    /// stderr stay machine-readable.
    pub fn new(colors_enabled: bool, json_mode: bool) -> Self {
        Self {
            term: Term::stderr(),
            show_progress: !json_mode,
            dim: Style::new().dim().force_styling(colors_enabled),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);

        if !self.show_progress {
            return;
        }

        if let AppEvent::Wait(wait) = &event {
            if let Some(line) = progress_line(wait) {
                // Best effort; a closed stderr must not fail the command
                let _ = self.term.write_line(&self.dim.apply_to(line).to_string());
            }
        }
    }
}

fn progress_line(event: &WaitEvent) -> Option<String> {
    match event {
        WaitEvent::Polled {
            roid,
            status,
            remaining_seconds,
        } => Some(format!(
            "Process Instance [{roid}] status: {status} ({remaining_seconds}s left)"
        )),
        WaitEvent::Sleeping { seconds, .. } => Some(format!("Checking again in {seconds}s")),
        WaitEvent::Finished { .. } => None,
    }
}
