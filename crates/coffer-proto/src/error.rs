//! Error types for response discrimination.

use thiserror::Error;

/// Errors produced when a vault core response resolves to a failure.
///
/// `Reported` carries a rejection the core made deliberately; `Malformed`
/// marks a response that violated the envelope contract itself. Neither is
/// ever retried or coerced to a default by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The core explicitly rejected the operation. The message is the
    /// core's own wording, passed through verbatim.
    #[error("{0}")]
    Reported(String),

    /// The response did not match the expected success/data or
    /// failure/message shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_displays_message_verbatim() {
        let err = DomainError::Reported("secret not found: abc".to_string());
        assert_eq!(err.to_string(), "secret not found: abc");
    }

    #[test]
    fn malformed_displays_reason() {
        let err = DomainError::Malformed("missing data".to_string());
        assert_eq!(err.to_string(), "malformed response: missing data");
    }
}
