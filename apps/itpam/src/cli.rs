//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use itpam_config::constants::ENV_PASSWORD;
use itpam_types::ColorChoice;
use std::path::PathBuf;

/// itpam - CA Process Automation client
#[derive(Parser)]
#[command(name = "itpam")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command line client for CA Process Automation")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Args)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Server base URL, e.g. http://pamserver:8080/itpam
    #[arg(long, global = true, value_name = "URL")]
    pub domain_url: Option<String>,

    /// PAM login username
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// PAM login password
    #[arg(long, global = true, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: Option<String>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Remote(RemoteCommand),

    /// List the available actions and their parameters
    Actions,
}

/// Commands that talk to a server
#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Check the status of the server
    #[command(name = "check-status")]
    CheckStatus,

    /// Start a process
    Start {
        /// Full path of the process
        process_path: String,

        /// Process parameter in name:value form (repeatable)
        #[arg(short, long = "param", value_name = "NAME:VALUE")]
        params: Vec<String>,
    },

    /// Show status and dataset of a process instance
    Status {
        /// Process instance ROID
        roid: String,
    },

    /// Wait for a process instance to end
    Wait {
        /// Process instance ROID
        roid: String,

        /// How often to check the status, in seconds
        #[arg(long, value_name = "SECONDS")]
        polling_seconds: Option<u64>,

        /// How long to wait before giving up, in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout_seconds: Option<u64>,
    },
}
