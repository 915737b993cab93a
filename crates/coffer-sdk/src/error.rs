//! Error taxonomy for the client.
//!
//! Three failure families, kept distinct so callers can react precisely:
//! transport failures crossing the core boundary, local authentication
//! precondition failures detected before any core call, and domain
//! failures reported by (or misreported by) the core itself.

use thiserror::Error;

pub use coffer_proto::DomainError;

/// A failure crossing the native-core boundary.
///
/// Never used for domain errors, which travel inside a successful raw
/// response. Not retried by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The command envelope could not be serialized.
    #[error("failed to encode command: {reason}")]
    Encode {
        /// Why serialization failed.
        reason: String,
    },

    /// The vault core was unreachable or failed to answer.
    #[error("vault core failure: {reason}")]
    Core {
        /// What went wrong at the boundary.
        reason: String,
    },
}

/// A local authentication precondition failure.
///
/// Detected before any native-core call; never retried, always surfaced
/// synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The access token was empty or refused by the core.
    #[error("invalid access token: {reason}")]
    InvalidAccessToken {
        /// Why the token was rejected.
        reason: String,
    },

    /// A scoped operation was issued before a successful login.
    #[error("not authenticated: log in before issuing commands")]
    NotAuthenticated,

    /// Login succeeded but the access token carried no organization claim.
    #[error("no organization found in access token")]
    NoOrganization,

    /// A second login was attempted on an already-authenticated handle.
    #[error("client is already authenticated")]
    AlreadyAuthenticated,

    /// The client handle has been closed; no further calls are valid.
    #[error("client is closed")]
    Closed,
}

/// Any failure a client method can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Local authentication precondition failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Boundary-crossing failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Core-reported rejection or protocol violation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
