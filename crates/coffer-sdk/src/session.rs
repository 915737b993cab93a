//! Login state and organization-claim extraction.
//!
//! The organization identity is carried inside the access token's JWT
//! claims, not supplied separately. The client decodes the claims without
//! verifying the signature; credential verification is the vault core's
//! job; this layer only reads what the token already embeds.

use std::sync::OnceLock;

use coffer_proto::OrganizationId;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims the client reads from an access token.
#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    /// Organization the machine identity belongs to.
    organization: Option<String>,
}

/// Extracts the organization claim from an access token.
///
/// A token that cannot be parsed, or whose claim is absent or empty,
/// carries no organization. That is not an error here; it surfaces later
/// as [`AuthError::NoOrganization`] when a scoped operation needs it.
pub(crate) fn organization_claim(access_token: &str) -> Option<OrganizationId> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<AccessTokenClaims>(access_token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .and_then(|token| token.claims.organization)
        .filter(|organization| !organization.is_empty())
        .map(OrganizationId::new)
}

/// Login state for one client handle.
///
/// Created empty, populated exactly once by a successful login, read-only
/// thereafter. Concurrent reads are safe; a second login attempt fails
/// rather than overwriting.
#[derive(Debug, Default)]
pub struct Session {
    state: OnceLock<LoginState>,
}

#[derive(Debug)]
struct LoginState {
    organization_id: Option<OrganizationId>,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: OnceLock::new(),
        }
    }

    /// Whether a login has completed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_some()
    }

    /// Records a completed login.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AlreadyAuthenticated`] if a login already
    /// completed on this session.
    pub(crate) fn establish(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<(), AuthError> {
        self.state
            .set(LoginState { organization_id })
            .map_err(|_| AuthError::AlreadyAuthenticated)
    }

    /// Returns the organization identity stored at login.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotAuthenticated`] before a login;
    /// [`AuthError::NoOrganization`] when the login succeeded but the
    /// token carried no organization claim.
    pub fn organization_id(&self) -> Result<&OrganizationId, AuthError> {
        let state = self.state.get().ok_or(AuthError::NotAuthenticated)?;
        state
            .organization_id
            .as_ref()
            .ok_or(AuthError::NoOrganization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn make_token(organization: Option<&str>) -> String {
        let claims = match organization {
            Some(org) => json!({"sub": "machine", "organization": org}),
            None => json!({"sub": "machine"}),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-signing-key-0123456789abcdef"),
        )
        .expect("encode token")
    }

    // ===================
    // Claim Extraction Tests
    // ===================

    #[test]
    fn organization_claim_present() {
        let token = make_token(Some("org-42"));
        assert_eq!(
            organization_claim(&token),
            Some(OrganizationId::new("org-42"))
        );
    }

    #[test]
    fn organization_claim_absent() {
        let token = make_token(None);
        assert_eq!(organization_claim(&token), None);
    }

    #[test]
    fn organization_claim_empty_string_counts_as_absent() {
        let token = make_token(Some(""));
        assert_eq!(organization_claim(&token), None);
    }

    #[test]
    fn organization_claim_unparseable_token() {
        assert_eq!(organization_claim("not-a-jwt"), None);
        assert_eq!(organization_claim(""), None);
    }

    // ===================
    // Session Tests
    // ===================

    #[test]
    fn session_starts_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(
            session.organization_id().expect_err("should fail"),
            AuthError::NotAuthenticated
        );
    }

    #[test]
    fn session_establish_with_organization() {
        let session = Session::new();
        session
            .establish(Some(OrganizationId::new("org-1")))
            .expect("establish");

        assert!(session.is_authenticated());
        assert_eq!(
            session.organization_id().expect("organization"),
            &OrganizationId::new("org-1")
        );
    }

    #[test]
    fn session_establish_without_organization() {
        let session = Session::new();
        session.establish(None).expect("establish");

        assert!(session.is_authenticated());
        assert_eq!(
            session.organization_id().expect_err("should fail"),
            AuthError::NoOrganization
        );
    }

    #[test]
    fn session_rejects_second_login() {
        let session = Session::new();
        session
            .establish(Some(OrganizationId::new("org-1")))
            .expect("first establish");

        let result = session.establish(Some(OrganizationId::new("org-2")));
        assert_eq!(
            result.expect_err("should fail"),
            AuthError::AlreadyAuthenticated
        );
        // The original identity is untouched.
        assert_eq!(
            session.organization_id().expect("organization"),
            &OrganizationId::new("org-1")
        );
    }
}
