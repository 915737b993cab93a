//! The client handle.
//!
//! One handle owns one vault core and one session. Lifecycle:
//! Unauthenticated → (login succeeds) → Authenticated → (close) → Closed.
//! Closed rejects every further call; there is no way back.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use coffer_proto::{AccessTokenLoginResponse, Command, OrganizationId, decode_response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::core::VaultCore;
use crate::error::{AuthError, Result};
use crate::generators::GeneratorsClient;
use crate::projects::ProjectsClient;
use crate::runner::CommandRunner;
use crate::secrets::SecretsClient;
use crate::session::{Session, organization_claim};

/// A handle to the secrets vault.
///
/// Exclusively owns the native core resource and the session. Resource
/// clients borrow the handle and cannot outlive it. All calls are
/// synchronous and blocking; no ordering is guaranteed across concurrent
/// calls, and login must complete before concurrent scoped calls are
/// issued (a precondition, not an enforced lock).
pub struct Client<C: VaultCore> {
    runner: CommandRunner<C>,
    session: Session,
    closed: AtomicBool,
}

impl<C: VaultCore> Client<C> {
    /// Wraps a vault core handle.
    #[must_use]
    pub fn new(core: C) -> Self {
        Self {
            runner: CommandRunner::new(core),
            session: Session::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Authenticates the machine identity.
    ///
    /// Forwards the token and the unchanged state-file path to the
    /// core for verification and exchange, then stores the organization
    /// identity embedded in the token's claims. Must complete exactly once
    /// before any scoped operation.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidAccessToken`] for an empty or refused token,
    /// [`AuthError::AlreadyAuthenticated`] for a repeated login,
    /// [`AuthError::Closed`] after close, plus any transport or domain
    /// failure from the exchange itself.
    pub fn login(&self, access_token: &str, state_file: Option<&Path>) -> Result<()> {
        self.ensure_open()?;

        if access_token.trim().is_empty() {
            return Err(AuthError::InvalidAccessToken {
                reason: "access token is empty".to_string(),
            }
            .into());
        }
        if self.session.is_authenticated() {
            return Err(AuthError::AlreadyAuthenticated.into());
        }

        let command = Command::login_access_token(access_token, state_file.map(Path::to_path_buf));
        let raw = self.runner.run(&command)?;
        let response: AccessTokenLoginResponse = decode_response(&raw)?;
        if !response.authenticated {
            return Err(AuthError::InvalidAccessToken {
                reason: "vault core refused the credential".to_string(),
            }
            .into());
        }

        let organization_id = organization_claim(access_token);
        if organization_id.is_none() {
            debug!("access token carries no organization claim");
        }
        self.session.establish(organization_id)?;
        info!("authenticated");
        Ok(())
    }

    /// Returns the organization identity stored at login.
    ///
    /// # Errors
    ///
    /// [`AuthError::Closed`] after close, [`AuthError::NotAuthenticated`]
    /// before login, [`AuthError::NoOrganization`] when the token carried
    /// no organization claim.
    pub fn organization_id(&self) -> Result<&OrganizationId> {
        self.ensure_open()?;
        Ok(self.session.organization_id()?)
    }

    /// Whether a login has completed on this handle.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Whether the handle has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// The Projects resource client.
    #[must_use]
    pub const fn projects(&self) -> ProjectsClient<'_, C> {
        ProjectsClient::new(self)
    }

    /// The Secrets resource client.
    #[must_use]
    pub const fn secrets(&self) -> SecretsClient<'_, C> {
        SecretsClient::new(self)
    }

    /// The Generators resource client.
    #[must_use]
    pub const fn generators(&self) -> GeneratorsClient<'_, C> {
        GeneratorsClient::new(self)
    }

    /// Closes the handle and releases the vault core.
    ///
    /// Idempotent and infallible; safe to call during teardown after
    /// prior failures. Every subsequent call on this handle fails with
    /// [`AuthError::Closed`].
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("releasing vault core");
            self.runner.core().shutdown();
        }
    }

    /// Resolves the organization scope for a mutating/listing Projects
    /// operation, failing fast before any core round-trip.
    pub(crate) fn scope(&self) -> Result<OrganizationId> {
        self.organization_id().cloned()
    }

    /// The single dispatch chokepoint: closed-check, run, discriminate.
    pub(crate) fn run_command<T: DeserializeOwned>(&self, command: &Command) -> Result<T> {
        self.ensure_open()?;
        let raw = self.runner.run(command)?;
        Ok(decode_response(&raw)?)
    }

    /// Dispatch for session-bound resource operations: additionally fails
    /// fast, before any core round-trip, when no login has completed.
    pub(crate) fn run_session_command<T: DeserializeOwned>(&self, command: &Command) -> Result<T> {
        self.ensure_open()?;
        if !self.session.is_authenticated() {
            return Err(AuthError::NotAuthenticated.into());
        }
        self.run_command(command)
    }

    fn ensure_open(&self) -> std::result::Result<(), AuthError> {
        if self.is_closed() {
            return Err(AuthError::Closed);
        }
        Ok(())
    }
}

impl<C: VaultCore> Drop for Client<C> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<C: VaultCore> fmt::Debug for Client<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("authenticated", &self.is_authenticated())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, TransportError};
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    /// A core scripted with canned raw responses.
    struct ScriptedCore {
        responses: Mutex<Vec<String>>,
        calls: AtomicUsize,
        shutdowns: AtomicUsize,
    }

    impl ScriptedCore {
        fn new(responses: &[&str]) -> Self {
            let mut scripted: Vec<String> = responses.iter().map(ToString::to_string).collect();
            scripted.reverse();
            Self {
                responses: Mutex::new(scripted),
                calls: AtomicUsize::new(0),
                shutdowns: AtomicUsize::new(0),
            }
        }
    }

    impl VaultCore for ScriptedCore {
        fn execute(&self, _payload: &str) -> std::result::Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .pop()
                .ok_or_else(|| TransportError::Core {
                    reason: "no scripted response".to_string(),
                })
        }

        fn shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    const LOGIN_OK: &str = r#"{"success": true, "data": {"authenticated": true}}"#;

    fn token_with_org() -> String {
        use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
        encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({"sub": "machine", "organization": "org-1"}),
            &EncodingKey::from_secret(b"test-signing-key-0123456789abcdef"),
        )
        .expect("encode token")
    }

    #[test]
    fn login_establishes_organization() {
        let client = Client::new(ScriptedCore::new(&[LOGIN_OK]));
        client.login(&token_with_org(), None).expect("login");

        assert!(client.is_authenticated());
        assert_eq!(
            client.organization_id().expect("organization"),
            &OrganizationId::new("org-1")
        );
    }

    #[test]
    fn login_empty_token_fails_without_core_call() {
        let core = std::sync::Arc::new(ScriptedCore::new(&[LOGIN_OK]));
        let client = Client::new(std::sync::Arc::clone(&core));

        let result = client.login("   ", None);
        assert!(matches!(
            result.expect_err("should fail"),
            Error::Auth(AuthError::InvalidAccessToken { .. })
        ));
        assert_eq!(core.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn login_twice_fails() {
        let client = Client::new(ScriptedCore::new(&[LOGIN_OK, LOGIN_OK]));
        client.login(&token_with_org(), None).expect("first login");

        let result = client.login(&token_with_org(), None);
        assert!(matches!(
            result.expect_err("should fail"),
            Error::Auth(AuthError::AlreadyAuthenticated)
        ));
    }

    #[test]
    fn login_refused_credential_is_surfaced() {
        let refused = r#"{"success": true, "data": {"authenticated": false}}"#;
        let client = Client::new(ScriptedCore::new(&[refused]));

        let result = client.login(&token_with_org(), None);
        assert!(matches!(
            result.expect_err("should fail"),
            Error::Auth(AuthError::InvalidAccessToken { .. })
        ));
        assert!(!client.is_authenticated());
    }

    #[test]
    fn close_releases_core_exactly_once() {
        let core = std::sync::Arc::new(ScriptedCore::new(&[]));
        let client = Client::new(std::sync::Arc::clone(&core));

        client.close();
        client.close();
        assert_eq!(core.shutdowns.load(Ordering::SeqCst), 1);

        drop(client);
        assert_eq!(core.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_core() {
        let core = std::sync::Arc::new(ScriptedCore::new(&[]));
        {
            let _client = Client::new(std::sync::Arc::clone(&core));
        }
        assert_eq!(core.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn closed_handle_rejects_everything() {
        let core = std::sync::Arc::new(ScriptedCore::new(&[LOGIN_OK]));
        let client = Client::new(std::sync::Arc::clone(&core));
        client.close();

        let login = client.login(&token_with_org(), None);
        assert!(matches!(
            login.expect_err("should fail"),
            Error::Auth(AuthError::Closed)
        ));

        let org = client.organization_id();
        assert!(matches!(
            org.expect_err("should fail"),
            Error::Auth(AuthError::Closed)
        ));

        assert_eq!(core.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_output_omits_credentials() {
        let client = Client::new(ScriptedCore::new(&[]));
        let debug = format!("{client:?}");
        assert!(debug.contains("Client"));
        assert!(debug.contains("authenticated"));
    }
}
