use thiserror::Error;

/// Outcome classification for every relay request.
///
/// All failures are returned as values to the immediate caller; the
/// relay never retries on its own. The tag alone disambiguates
/// handling: credentials are a user-input problem, an unknown command
/// is a stale-cache problem, and `Cancelled` is internal bookkeeping
/// that must never surface.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No TV address is configured — recoverable by user input,
    /// checked before any network attempt.
    #[error("TV connection details are not configured")]
    MissingCredentials,

    /// The cached command table has no entry for this command
    /// (e.g. stale cache after a firmware change). Recoverable by
    /// forcing a table reload.
    #[error("command '{name}' not found for this TV")]
    UnknownCommand { name: String },

    /// A newer request superseded this one. Swallowed at the
    /// presentation boundary, never shown to the user.
    #[error("request superseded by a newer one")]
    Cancelled,

    /// Transport-level failure, surfaced to the user verbatim.
    #[error("network failure: {0}")]
    Network(#[from] bravia_api::Error),
}

impl RelayError {
    /// Returns `true` for the internal supersession signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this outcome should produce a user-visible
    /// alert. Only missing credentials and transport failures do;
    /// an unknown command is a reload cue and cancellation is silent.
    pub fn alerts_user(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::Network(_))
    }
}
