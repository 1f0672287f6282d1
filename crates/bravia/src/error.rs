//! CLI error types with miette diagnostics.
//!
//! Maps `RelayError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use bravia_core::RelayError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the TV at {address}")]
    #[diagnostic(
        code(bravia::connection_failed),
        help(
            "Check that the TV is on and reachable on your network.\n\
             Address: {address}\n\
             Reconfigure with: bravia connect"
        )
    )]
    ConnectionFailed {
        address: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("The TV rejected the pre-shared key")]
    #[diagnostic(
        code(bravia::auth_rejected),
        help(
            "The PSK must match the one set on the TV under\n\
             Settings > Network > Home Network > IP Control.\n\
             Update it with: bravia config set-psk"
        )
    )]
    AuthRejected { address: String },

    #[error("No TV connection details are configured")]
    #[diagnostic(
        code(bravia::no_credentials),
        help(
            "Run the setup wizard: bravia connect\n\
             Or set BRAVIA_ADDRESS and BRAVIA_PSK environment variables."
        )
    )]
    NoCredentials,

    // ── Commands ─────────────────────────────────────────────────────

    #[error("Command '{name}' is not in the TV's command table")]
    #[diagnostic(
        code(bravia::unknown_command),
        help(
            "The cached table may be stale. Refresh it with: bravia commands reload\n\
             List available commands with: bravia commands list"
        )
    )]
    UnknownCommand { name: String },

    #[error("The TV sent a response this tool could not parse: {message}")]
    #[diagnostic(
        code(bravia::protocol),
        help("The address may point at something other than a Bravia TV.")
    )]
    Protocol { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(bravia::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Keyring access failed: {message}")]
    #[diagnostic(
        code(bravia::keyring),
        help("Store the key in the config file instead: bravia config set-psk --file")
    )]
    Keyring { message: String },

    #[error(transparent)]
    #[diagnostic(code(bravia::config))]
    Config(bravia_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<bravia_config::ConfigError> for CliError {
    fn from(err: bravia_config::ConfigError) -> Self {
        match err {
            bravia_config::ConfigError::Keyring { message } => Self::Keyring { message },
            other => Self::Config(other),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthRejected { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::UnknownCommand { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Map a relay failure into a CLI error, attaching the TV address
    /// for context. `Cancelled` cannot occur in single-shot CLI use;
    /// it is folded into the connection case.
    pub fn from_relay(err: RelayError, address: &str) -> Self {
        match err {
            RelayError::MissingCredentials => Self::NoCredentials,
            RelayError::UnknownCommand { name } => Self::UnknownCommand { name },
            RelayError::Network(api) => Self::from_api(api, address),
            RelayError::Cancelled => Self::ConnectionFailed {
                address: address.to_string(),
                source: "request superseded".into(),
            },
        }
    }

    /// Map a transport-level failure into a CLI error.
    pub fn from_api(err: bravia_api::Error, address: &str) -> Self {
        if err.is_auth_rejected() {
            return Self::AuthRejected {
                address: address.to_string(),
            };
        }
        match err {
            bravia_api::Error::InvalidUrl(parse) => Self::Validation {
                field: "address".into(),
                reason: format!("'{address}' is not a valid TV address: {parse}"),
            },
            bravia_api::Error::MalformedResponse { message } => Self::Protocol { message },
            other => Self::ConnectionFailed {
                address: address.to_string(),
                source: other.into(),
            },
        }
    }
}
