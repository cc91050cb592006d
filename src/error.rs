//! Application error types.
//!
//! Everything the relay can fail with is captured here as a typed variant,
//! so no raw transport error crosses out of the client layer and the HTTP
//! layer can map each kind to a status code in one place.

use thiserror::Error;

/// Relay error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller input malformed (empty username or password).
    #[error("username and password are required")]
    InvalidRequest,

    /// The upstream portal declined the credentials.
    #[error("invalid username or password")]
    AuthRejected,

    /// Transport-level failure against the upstream portal, timeouts
    /// included. Carries the underlying error text.
    #[error("error reaching portal: {0}")]
    UpstreamUnavailable(String),

    /// The caller holds no usable session.
    #[error("unauthorized access")]
    Unauthorized,

    /// The report body was too short or otherwise unusable.
    #[error("failed to parse attendance report: {0}")]
    MalformedReport(String),

    /// Strict field-count policy only: header and data row disagree.
    #[error("report header has {header} fields but data row has {data}")]
    FieldCountMismatch { header: usize, data: usize },
}

impl Error {
    /// Wrap a transport error as `UpstreamUnavailable`.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Error::UpstreamUnavailable(err.to_string())
    }
}

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;
