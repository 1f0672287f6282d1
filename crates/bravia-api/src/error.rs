use thiserror::Error;

/// Top-level error type for the `bravia-api` crate.
///
/// Covers the transport-level failure modes of the two TV endpoints.
/// `bravia-core` maps these into its request-outcome taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (usually a malformed TV address).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Device responses ────────────────────────────────────────────
    /// The TV answered with a non-success HTTP status.
    #[error("TV returned HTTP {status}")]
    Status { status: u16 },

    /// The discovery response did not match the expected
    /// `{result: [_, [{name, value}, ...]]}` shape.
    #[error("Malformed discovery response: {message}")]
    MalformedResponse { message: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` for an authentication rejection (wrong or missing PSK).
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403 })
    }
}
