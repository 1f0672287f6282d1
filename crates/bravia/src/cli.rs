//! Clap derive structures for the `bravia` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bravia -- command-line remote for Sony Bravia TVs
#[derive(Debug, Parser)]
#[command(
    name = "bravia",
    version,
    about = "Control a Sony Bravia TV from the command line",
    long_about = "Send remote-control commands to a Sony Bravia TV over its\n\
        IP control interface (IRCC-IP). The TV must have \"Simple IP control\"\n\
        enabled and a pre-shared key configured under\n\
        Settings > Network > Home Network > IP Control.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// TV address (IP or host[:port], overrides the config file)
    #[arg(long, short = 'a', env = "BRAVIA_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Pre-shared key (overrides keyring / config file)
    #[arg(long, env = "BRAVIA_PSK", global = true, hide_env = true)]
    pub psk: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "BRAVIA_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive setup: address, pre-shared key, connectivity check
    #[command(alias = "init")]
    Connect,

    /// Send one or more remote commands to the TV
    #[command(alias = "s")]
    Send(SendArgs),

    /// Inspect the TV's remote-command table
    #[command(alias = "cmd")]
    Commands(CommandsArgs),

    /// Manage stored connection details
    Config(ConfigArgs),
}

// ── Send ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Command names (e.g. power, volume-up, netflix), sent in order
    #[arg(required = true, num_args = 1..)]
    pub commands: Vec<String>,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CommandsArgs {
    #[command(subcommand)]
    pub command: CommandsCommand,
}

#[derive(Debug, Subcommand)]
pub enum CommandsCommand {
    /// List every command the TV reports, with its IRCC code
    #[command(alias = "ls")]
    List,

    /// Force a fresh command-table fetch from the TV
    Reload,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the stored connection details (PSK value is never printed)
    Show,

    /// Store the TV address
    SetAddress {
        /// IP or host[:port]
        address: String,
    },

    /// Prompt for and store the pre-shared key
    SetPsk {
        /// Store in the config file instead of the system keyring
        #[arg(long)]
        file: bool,
    },

    /// Print the config file path
    Path,
}
