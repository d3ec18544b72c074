//! Result types returned by the operations

use itpam_config::constants::{DEFAULT_POLLING_SECONDS, DEFAULT_TIMEOUT_SECONDS};
use itpam_types::{Dataset, ProcessStatus};
use serde::Serialize;

/// Status and dataset of a process instance at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessState {
    pub status: ProcessStatus,
    pub dataset: Dataset,
}

/// Polling cadence and time budget for [`wait_for_completion`](crate::wait_for_completion)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub polling_seconds: u64,
    pub timeout_seconds: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            polling_seconds: DEFAULT_POLLING_SECONDS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// How a wait ended
///
/// `completed` means the loop saw a terminal status, which includes
/// `Failed` and `Aborted`. It says nothing about whether the process
/// itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitOutcome {
    pub status: ProcessStatus,
    pub dataset: Dataset,
    pub completed: bool,
}
