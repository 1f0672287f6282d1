//! Command-table subcommand handlers.

use serde::Serialize;
use tabled::Tabled;

use bravia_core::CommandRelay;

use crate::cli::{CommandsArgs, CommandsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize, Tabled)]
struct CommandRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "IRCC CODE")]
    code: String,
}

pub async fn handle(
    relay: &CommandRelay,
    address: &str,
    args: CommandsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CommandsCommand::List => {
            let table = relay
                .fetch_command_table(false)
                .await
                .map_err(|e| CliError::from_relay(e, address))?;

            let mut rows: Vec<CommandRow> = table
                .iter()
                .map(|(name, code)| CommandRow {
                    name: name.to_string(),
                    code: code.to_string(),
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));

            let rendered = output::render_list(&global.output, &rows, |row| row.name.clone());
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        CommandsCommand::Reload => {
            let table = relay
                .fetch_command_table(true)
                .await
                .map_err(|e| CliError::from_relay(e, address))?;

            if !global.quiet {
                eprintln!(
                    "{} command table reloaded ({} commands)",
                    output::check_mark(),
                    table.len()
                );
            }
            Ok(())
        }
    }
}
