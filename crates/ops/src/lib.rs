#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Remote process operations for CA Process Automation
//!
//! This crate sits between the CLI and the wire crates. The four
//! operations (`check_server_status`, `start_process`,
//! `get_process_status`, `wait_for_completion`) are generic over
//! [`SoapTransport`](itpam_net::SoapTransport) and report progress through
//! an optional event channel. The [`actions`] module wraps them into
//! host-facing actions that never fail outright.

pub mod actions;
mod context;
mod exchange;
mod process;
mod server;
#[cfg(test)]
mod test_support;
mod types;
mod wait;

pub use actions::{
    all_descriptors, Action, ActionDescriptor, ActionOutput, ActionResult,
    CheckServerStatusAction, ConnectionInputs, GetProcessStatusAction, OutputValue,
    ParameterDescriptor, ParameterKind, StartProcessAction, WaitForProcessEndAction,
};
pub use context::OpsCtx;
pub use process::{get_process_status, start_process};
pub use server::check_server_status;
pub use types::{ProcessState, WaitOptions, WaitOutcome};
pub use wait::wait_for_completion;
