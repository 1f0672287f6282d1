//! Send subcommand handler.

use std::str::FromStr;

use strum::IntoEnumIterator;

use bravia_core::{CommandRelay, SemanticCommand};

use crate::cli::{GlobalOpts, SendArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    relay: &CommandRelay,
    address: &str,
    args: SendArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Parse every name up front so a typo in the third command
    // doesn't send the first two.
    let commands = args
        .commands
        .iter()
        .map(|raw| parse_command(raw))
        .collect::<Result<Vec<_>, _>>()?;

    // A fresh process has no cached table; command codes come from
    // discovery before anything is sent.
    relay
        .fetch_command_table(false)
        .await
        .map_err(|e| CliError::from_relay(e, address))?;

    for command in commands {
        relay
            .send_command(command)
            .await
            .map_err(|e| CliError::from_relay(e, address))?;

        if !global.quiet {
            eprintln!("{} sent {command}", output::check_mark());
        }
    }
    Ok(())
}

/// Parse a kebab-case command name, listing the vocabulary on failure.
fn parse_command(raw: &str) -> Result<SemanticCommand, CliError> {
    SemanticCommand::from_str(raw).map_err(|_| {
        let known = SemanticCommand::iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        CliError::Validation {
            field: "command".into(),
            reason: format!("unknown command '{raw}' (known: {known})"),
        }
    })
}
