//! Access-token verification and demo-token minting.
//!
//! The fake core accepts any structurally valid, unexpired JWT; it has no
//! identity backend to check signatures against. [`mint_access_token`]
//! produces tokens in the same shape a real provisioning flow would, with
//! the organization identity embedded as a claim.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Signing key for minted demo tokens. Not a secret; the fake core never
/// verifies signatures.
const DEMO_SIGNING_KEY: &[u8] = b"coffer-fake-core-demo-signing-key";

/// Lifetime of a minted demo token.
const TOKEN_VALIDITY_HOURS: i64 = 24;

/// Claims carried by a machine access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TokenClaims {
    /// Subject (machine identity).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Organization the machine belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Issued-at (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration (Unix timestamp).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Mints a machine access token for tests and demos.
///
/// The organization identity, when given, is embedded as a claim; the
/// client extracts it from there; it is never supplied separately.
#[must_use]
pub fn mint_access_token(organization: Option<&str>) -> String {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: Some("machine".to_string()),
        organization: organization.map(ToString::to_string),
        iat: Some(now.timestamp()),
        exp: Some((now + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp()),
    };

    #[allow(clippy::expect_used)] // serializing a plain struct cannot fail
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(DEMO_SIGNING_KEY),
    )
    .expect("token encoding is infallible for serializable claims")
}

/// Verifies an access token and returns its claims.
///
/// Structural verification only: the token must be a parseable JWT and,
/// when it carries an expiry, must not be expired.
pub(crate) fn verify(access_token: &str) -> Result<TokenClaims, CoreError> {
    if access_token.trim().is_empty() {
        return Err(CoreError::InvalidAccessToken {
            reason: "access token is empty".to_string(),
        });
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let token = decode::<TokenClaims>(
        access_token,
        &DecodingKey::from_secret(&[]),
        &validation,
    )
    .map_err(|e| CoreError::InvalidAccessToken {
        reason: e.to_string(),
    })?;

    if let Some(exp) = token.claims.exp {
        if exp < Utc::now().timestamp() {
            return Err(CoreError::InvalidAccessToken {
                reason: "access token is expired".to_string(),
            });
        }
    }

    Ok(token.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_token_verifies() {
        let token = mint_access_token(Some("org-1"));
        let claims = verify(&token).expect("verify");
        assert_eq!(claims.organization.as_deref(), Some("org-1"));
        assert_eq!(claims.sub.as_deref(), Some("machine"));
    }

    #[test]
    fn minted_token_without_organization() {
        let token = mint_access_token(None);
        let claims = verify(&token).expect("verify");
        assert!(claims.organization.is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = verify("");
        assert!(matches!(
            result.expect_err("should fail"),
            CoreError::InvalidAccessToken { .. }
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let result = verify("definitely-not-a-jwt");
        assert!(matches!(
            result.expect_err("should fail"),
            CoreError::InvalidAccessToken { .. }
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let past = Utc::now() - Duration::hours(2);
        let claims = TokenClaims {
            sub: Some("machine".to_string()),
            organization: Some("org-1".to_string()),
            iat: Some(past.timestamp()),
            exp: Some((past + Duration::hours(1)).timestamp()),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(DEMO_SIGNING_KEY),
        )
        .expect("encode");

        let result = verify(&token);
        assert_eq!(
            result.expect_err("should fail"),
            CoreError::InvalidAccessToken {
                reason: "access token is expired".to_string()
            }
        );
    }
}
