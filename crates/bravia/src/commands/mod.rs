//! Command dispatch: bridges CLI args -> relay calls -> output formatting.

pub mod config_cmd;
pub mod connect;
pub mod send;
pub mod table;

use bravia_core::CommandRelay;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a TV-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    relay: &CommandRelay,
    address: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Send(args) => send::handle(relay, address, args, global).await,
        Command::Commands(args) => table::handle(relay, address, args, global).await,
        // Handled before a relay is built
        Command::Connect | Command::Config(_) => unreachable!("dispatched in run()"),
    }
}
