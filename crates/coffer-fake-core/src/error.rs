//! Internal rejection reasons.
//!
//! A `CoreError`'s `Display` string is exactly what goes on the wire as
//! the response envelope's `errorMessage`.

use thiserror::Error;

/// Why the core rejected a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CoreError {
    /// The access token could not be accepted.
    #[error("invalid access token: {reason}")]
    InvalidAccessToken {
        /// Why the token was rejected.
        reason: String,
    },

    /// A resource command arrived before a login.
    #[error("not authenticated")]
    NotAuthenticated,

    /// No project with the given id exists.
    #[error("project not found: {id}")]
    ProjectNotFound {
        /// The requested id.
        id: String,
    },

    /// No secret with the given id exists.
    #[error("secret not found: {id}")]
    SecretNotFound {
        /// The requested id.
        id: String,
    },

    /// A password of zero length was requested.
    #[error("password length must be greater than zero")]
    ZeroLength,

    /// Every character class was disabled.
    #[error("at least one character class must be enabled")]
    NoCharacterClasses,

    /// A minimum was set for a class that is not enabled.
    #[error("minimum set for disabled character class: {class}")]
    MinimumForDisabledClass {
        /// The disabled class.
        class: &'static str,
    },

    /// The minimums jointly exceed the requested length.
    #[error("minimum character requirements exceed the requested length")]
    InfeasibleMinimums,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_messages() {
        assert_eq!(
            CoreError::SecretNotFound {
                id: "s-1".to_string()
            }
            .to_string(),
            "secret not found: s-1"
        );
        assert_eq!(CoreError::NotAuthenticated.to_string(), "not authenticated");
        assert_eq!(
            CoreError::InfeasibleMinimums.to_string(),
            "minimum character requirements exceed the requested length"
        );
    }
}
