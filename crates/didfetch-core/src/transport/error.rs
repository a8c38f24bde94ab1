//! Per-region fetch failure.

use thiserror::Error;

/// Why a region could not be downloaded. Reported, never propagated past the
/// region that produced it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    #[error("HTTP Error {status}: {reason}")]
    Http { status: u32, reason: String },
    /// No usable response: DNS, refused connection, timeout, TLS, reset.
    #[error("URL Error: {0}")]
    Transport(String),
    /// Anything else (local I/O, client setup).
    #[error("Error: {0}")]
    Other(String),
}

impl FetchError {
    pub fn other(err: impl std::fmt::Display) -> Self {
        FetchError::Other(err.to_string())
    }

    /// Short tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http { .. } => "http",
            FetchError::Transport(_) => "transport",
            FetchError::Other(_) => "other",
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}
