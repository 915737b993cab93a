//! Identifier newtypes and client settings.
//!
//! Resource identifiers are opaque strings minted by the vault core on
//! create; the client never generates them. Wrapping them in newtypes keeps
//! project, secret, and organization ids from being swapped at call sites.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default API endpoint used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.coffer.dev";

/// Default identity endpoint used when no override is configured.
pub const DEFAULT_IDENTITY_URL: &str = "https://identity.coffer.dev";

/// A project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Wraps an identifier received from the vault core.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A secret identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretId(String);

impl SecretId {
    /// Wraps an identifier received from the vault core.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SecretId> for String {
    fn from(id: SecretId) -> Self {
        id.0
    }
}

impl AsRef<str> for SecretId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An organization identifier, carried inside access-token claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Wraps an identifier extracted from an access token.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OrganizationId> for String {
    fn from(id: OrganizationId) -> Self {
        id.0
    }
}

impl AsRef<str> for OrganizationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Service endpoint configuration handed to a vault core on construction.
///
/// Absent or empty values mean "use the built-in defaults"; they are a
/// configuration option, never a validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// Override for the API endpoint.
    pub api_url: Option<String>,
    /// Override for the identity endpoint.
    pub identity_url: Option<String>,
}

impl ClientSettings {
    /// Creates settings that use the built-in defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            api_url: None,
            identity_url: None,
        }
    }

    /// Sets the API endpoint. Trailing slashes are trimmed.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Sets the identity endpoint. Trailing slashes are trimmed.
    #[must_use]
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Returns the API endpoint, falling back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn effective_api_url(&self) -> &str {
        match self.api_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_API_URL,
        }
    }

    /// Returns the identity endpoint, falling back to
    /// [`DEFAULT_IDENTITY_URL`].
    #[must_use]
    pub fn effective_identity_url(&self) -> &str {
        match self.identity_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_IDENTITY_URL,
        }
    }
}
