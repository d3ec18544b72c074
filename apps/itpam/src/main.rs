//! itpam - CA Process Automation client
//!
//! This is the command line front end. It resolves configuration, builds
//! the requested action and runs it through the ops crate, draining
//! progress events while the action is in flight.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands, RemoteCommand};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use itpam_config::Config;
use itpam_errors::ConfigError;
use itpam_events::{EventReceiver, EventSender};
use itpam_net::{NetConfig, SoapClient};
use itpam_ops::{
    Action, ActionResult, CheckServerStatusAction, ConnectionInputs, GetProcessStatusAction,
    StartProcessAction, WaitForProcessEndAction, WaitOptions,
};
use itpam_types::{ColorChoice, OutputFormat};
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Application error: {}", e);
            if !json_mode {
                eprintln!("Error: {e}");
            }
            process::exit(1);
        }
    }
}

/// Main application logic; returns the action's success flag
async fn run(cli: Cli) -> Result<bool, CliError> {
    info!("Starting itpam v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global, &cli.command);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    };
    let json_mode = config.general.default_output == OutputFormat::Json;
    let renderer = OutputRenderer::new(config.general.default_output, colors_enabled);

    let command = match cli.command {
        Commands::Remote(command) => command,
        Commands::Actions => {
            renderer.render_catalog(&itpam_ops::all_descriptors())?;
            return Ok(true);
        }
    };

    let connection = connection_inputs(&config, cli.global.password)?;
    let client = SoapClient::new(&NetConfig::from(&config.network))?;

    let (event_sender, event_receiver) = itpam_events::channel();
    let mut event_handler = EventHandler::new(colors_enabled, json_mode);

    let result = execute_command_with_events(
        command,
        &config,
        connection,
        &client,
        event_sender,
        event_receiver,
        &mut event_handler,
    )
    .await?;

    renderer.render_result(&result)?;

    info!(success = result.success, "Command completed");
    Ok(result.success)
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: RemoteCommand,
    config: &Config,
    connection: ConnectionInputs,
    client: &SoapClient,
    event_sender: EventSender,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<ActionResult, CliError> {
    let mut command_future = Box::pin(execute_command(
        command,
        config,
        connection,
        client,
        event_sender,
    ));

    // Handle events concurrently with command execution
    loop {
        select! {
            // Command completed
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            // Event received
            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    command: RemoteCommand,
    config: &Config,
    connection: ConnectionInputs,
    client: &SoapClient,
    tx: EventSender,
) -> Result<ActionResult, CliError> {
    let events = Some(&tx);
    let result = match command {
        RemoteCommand::CheckStatus => {
            CheckServerStatusAction::new(connection)
                .execute(client, events)
                .await
        }

        RemoteCommand::Start {
            process_path,
            params,
        } => {
            StartProcessAction::new(connection, process_path, params)
                .execute(client, events)
                .await
        }

        RemoteCommand::Status { roid } => {
            GetProcessStatusAction::new(connection, roid)
                .execute(client, events)
                .await
        }

        RemoteCommand::Wait { roid, .. } => {
            let options = WaitOptions {
                polling_seconds: config.wait.polling_seconds,
                timeout_seconds: config.wait.timeout_seconds,
            };
            WaitForProcessEndAction::new(connection, roid)
                .with_options(options)
                .execute(client, events)
                .await
        }
    };
    Ok(result)
}

/// Connection inputs from resolved configuration
///
/// The domain URL must be a valid http(s) URL and a username is required;
/// an absent password is sent as empty and left for the server to reject.
fn connection_inputs(
    config: &Config,
    password: Option<String>,
) -> Result<ConnectionInputs, CliError> {
    let endpoint = config.endpoint()?;
    let username = config
        .server
        .username
        .clone()
        .ok_or_else(|| ConfigError::MissingField {
            field: "username".to_string(),
        })?;

    Ok(ConnectionInputs::new(
        endpoint.as_str(),
        username,
        password.unwrap_or_default(),
    ))
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    let default_filter = if debug_enabled {
        "info,itpam=debug,itpam_ops=debug,itpam_net=debug"
    } else {
        "warn,itpam=warn,itpam_ops=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    if json_mode {
        if debug_enabled {
            // Structured records on stderr keep stdout clean for the result
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_writer(std::io::sink)
                .with_env_filter("off")
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs, command: &Commands) {
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(url) = &global.domain_url {
        config.server.domain_url = Some(url.clone());
    }
    if let Some(username) = &global.username {
        config.server.username = Some(username.clone());
    }

    if let Commands::Remote(RemoteCommand::Wait {
        polling_seconds,
        timeout_seconds,
        ..
    }) = command
    {
        if let Some(polling) = polling_seconds {
            config.wait.polling_seconds = *polling;
        }
        if let Some(timeout) = timeout_seconds {
            config.wait.timeout_seconds = *timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "itpam",
            "--domain-url",
            "http://cli:8080/itpam",
            "wait",
            "42",
            "--polling-seconds",
            "5",
        ])
        .unwrap();

        let mut config = Config::from_toml(
            r#"
            [server]
            domain_url = "http://file:8080/itpam"
            username = "pamadmin"

            [wait]
            polling_seconds = 10
            timeout_seconds = 120
            "#,
        )
        .unwrap();
        apply_cli_config(&mut config, &cli.global, &cli.command);

        assert_eq!(
            config.server.domain_url.as_deref(),
            Some("http://cli:8080/itpam")
        );
        assert_eq!(config.server.username.as_deref(), Some("pamadmin"));
        assert_eq!(config.wait.polling_seconds, 5);
        assert_eq!(config.wait.timeout_seconds, 120);
    }

    #[test]
    fn test_missing_domain_url() {
        let mut config = Config::default();
        config.server.username = Some("pamadmin".to_string());

        let err = connection_inputs(&config, None).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::MissingField { ref field }) if field == "domain_url"
        ));
    }

    #[test]
    fn test_connection_inputs() {
        let mut config = Config::default();
        config.server.domain_url = Some("http://pam:8080/itpam".to_string());
        config.server.username = Some("pamadmin".to_string());

        let inputs = connection_inputs(&config, Some("secret".to_string())).unwrap();
        assert_eq!(inputs.domain_url, "http://pam:8080/itpam");
        assert_eq!(inputs.password.expose(), "secret");
    }

    #[test]
    fn test_invalid_domain_url_is_rejected() {
        let mut config = Config::default();
        config.server.domain_url = Some("pamserver:8080/itpam".to_string());
        config.server.username = Some("pamadmin".to_string());

        let err = connection_inputs(&config, None).unwrap_err();
        assert!(matches!(
            err,
            CliError::Ops(itpam_errors::Error::Network(
                itpam_errors::NetworkError::InvalidUrl(_)
            ))
        ));
    }
}
