//! Error types for the Siwar client.
//!
//! # Design
//! Authentication failures get a dedicated variant because callers handle a
//! bad API key differently from every other failure. Everything else the
//! service or the network can do wrong lands in `ApiError`, which keeps the
//! cause (status and body, transport description, or parse message) for
//! debugging. `MissingLexiconIds` and `UnsupportedAccess` are raised locally,
//! before any request is sent, when the caller asks for something the
//! endpoint table cannot serve.

use crate::endpoints::{Access, Endpoint};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `SiwarClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered 401.
    #[error("Invalid API key")]
    Authentication,

    /// Any other failure talking to the service.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A private operation was called with no lexicon IDs.
    #[error("private access requires at least one lexicon id")]
    MissingLexiconIds,

    /// The endpoint table has no path for this combination.
    #[error("{endpoint} has no {access} endpoint")]
    UnsupportedAccess { endpoint: Endpoint, access: Access },
}

impl Error {
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication)
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api(_))
    }
}

/// The generic API failure kind.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned a non-2xx status other than 401.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// No response was received (DNS, refused connection, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body is not valid JSON.
    #[error("failed to parse API response: {0}")]
    InvalidJson(String),

    /// Valid JSON that does not match the expected record shape.
    #[error("failed to decode API response: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialization(String),
}

/// Failure reported by a `Transport` when no HTTP response was received.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Transport(e.0)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Api(e.into())
    }
}
