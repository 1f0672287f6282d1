mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::EnvFilter;

use bravia_api::{BraviaClient, TransportConfig};
use bravia_core::{CommandRelay, CredentialStore, MemoryCredentials};
use bravia_config::StoredCredentials;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a TV connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Connect builds its own credentials from the wizard answers
        Command::Connect => commands::connect::handle(&cli.global).await,

        // All other commands talk to the TV
        cmd => {
            let credentials = build_credentials(&cli.global)?;
            let address = credentials.address();
            let relay = build_relay(&cli.global, credentials, &address)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &relay, &address, &cli.global).await
        }
    }
}

/// Resolve credentials from CLI flags / env, falling back to the
/// stored config (file + keyring) for anything not overridden.
fn build_credentials(global: &cli::GlobalOpts) -> Result<Arc<dyn CredentialStore>, CliError> {
    let stored = StoredCredentials::load()?;
    if global.address.is_none() && global.psk.is_none() {
        return Ok(Arc::new(stored));
    }

    let address = global
        .address
        .clone()
        .unwrap_or_else(|| stored.address());
    let psk = global
        .psk
        .clone()
        .map(SecretString::from)
        .unwrap_or_else(|| stored.token());
    Ok(Arc::new(MemoryCredentials::new(
        address,
        psk.expose_secret(),
    )))
}

fn build_relay(
    global: &cli::GlobalOpts,
    credentials: Arc<dyn CredentialStore>,
    address: &str,
) -> Result<CommandRelay, CliError> {
    let transport = TransportConfig {
        timeout: Duration::from_secs(global.timeout),
    };
    let client =
        BraviaClient::new(&transport).map_err(|e| CliError::from_api(e, address))?;
    Ok(CommandRelay::with_client(client, credentials))
}
