//! The in-process vault core.
//!
//! [`FakeVaultCore`] implements the client's [`VaultCore`] boundary over
//! in-memory stores: it parses each command envelope, routes it, and wraps
//! every outcome, success or rejection, in a response envelope. Only
//! envelope-level failures (an unparseable command) cross the boundary as
//! transport errors.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use coffer_proto::{
    AccessTokenLoginRequest, AccessTokenLoginResponse, ClientSettings, Command, GeneratorsCommand,
    OrganizationId, ProjectsCommand, Response, SecretsCommand,
};
use coffer_sdk::{TransportError, VaultCore};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::generator;
use crate::state;
use crate::store::VaultStore;
use crate::token;

/// Session material held after a successful login.
#[derive(Debug, Clone)]
struct CoreSession {
    organization_id: Option<OrganizationId>,
}

/// An in-process vault engine for tests and demos.
///
/// Performs no real cryptography or network I/O: tokens are checked
/// structurally, secrets live in memory in the clear, and session
/// persistence is a fingerprint file. The command/response contract,
/// however, is the real one.
pub struct FakeVaultCore {
    settings: ClientSettings,
    store: VaultStore,
    session: RwLock<Option<CoreSession>>,
    commands: AtomicUsize,
    exchanges: AtomicUsize,
}

impl FakeVaultCore {
    /// Creates a core with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(ClientSettings::new())
    }

    /// Creates a core configured with the given service URLs.
    #[must_use]
    pub fn with_settings(settings: ClientSettings) -> Self {
        info!(
            api_url = settings.effective_api_url(),
            identity_url = settings.effective_identity_url(),
            "vault core ready"
        );
        Self {
            settings,
            store: VaultStore::new(),
            session: RwLock::new(None),
            commands: AtomicUsize::new(0),
            exchanges: AtomicUsize::new(0),
        }
    }

    /// The settings the core was constructed with.
    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// How many command envelopes reached this core.
    #[must_use]
    pub fn commands_received(&self) -> usize {
        self.commands.load(Ordering::SeqCst)
    }

    /// How many full credential exchanges this core performed. A login
    /// restored from a state file does not count.
    #[must_use]
    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    fn dispatch(&self, command: Command) -> String {
        match command {
            Command::LoginAccessToken(request) => respond(self.handle_login(&request)),
            Command::Projects(command) => self.dispatch_projects(command),
            Command::Secrets(command) => self.dispatch_secrets(command),
            Command::Generators(GeneratorsCommand::GeneratePassword(request)) => {
                respond(generator::generate(&request))
            }
        }
    }

    fn dispatch_projects(&self, command: ProjectsCommand) -> String {
        match command {
            ProjectsCommand::Get(request) => respond(
                self.require_session()
                    .and_then(|_| self.store.get_project(&request.id)),
            ),
            ProjectsCommand::Create(request) => respond(self.require_session().map(|_| {
                self.store
                    .create_project(request.organization_id, request.name)
            })),
            ProjectsCommand::List(request) => respond(
                self.require_session()
                    .map(|_| self.store.list_projects(&request.organization_id)),
            ),
            ProjectsCommand::Update(request) => respond(
                self.require_session()
                    .and_then(|_| self.store.update_project(&request.id, request.name)),
            ),
            ProjectsCommand::Delete(request) => respond(
                self.require_session()
                    .map(|_| self.store.delete_projects(&request.ids)),
            ),
        }
    }

    fn dispatch_secrets(&self, command: SecretsCommand) -> String {
        match command {
            SecretsCommand::Get(request) => respond(
                self.require_session()
                    .and_then(|_| self.store.get_secret(&request.id)),
            ),
            SecretsCommand::GetByIds(request) => respond(
                self.require_session()
                    .map(|_| self.store.get_secrets_by_ids(&request.ids)),
            ),
            SecretsCommand::Create(request) => respond(
                self.require_session()
                    .map(|session| self.store.create_secret(session.organization_id, request)),
            ),
            SecretsCommand::List => {
                respond(self.require_session().map(|_| self.store.list_secrets()))
            }
            SecretsCommand::Update(request) => respond(
                self.require_session()
                    .and_then(|_| self.store.update_secret(request)),
            ),
            SecretsCommand::Delete(request) => respond(
                self.require_session()
                    .map(|_| self.store.delete_secrets(&request.ids)),
            ),
            SecretsCommand::Sync(request) => respond(
                self.require_session()
                    .map(|_| self.store.sync_secrets(request.last_synced_date)),
            ),
        }
    }

    fn handle_login(
        &self,
        request: &AccessTokenLoginRequest,
    ) -> Result<AccessTokenLoginResponse, CoreError> {
        if let Some(path) = &request.state_file {
            if let Some(saved) = state::restore(path, &request.access_token) {
                debug!("session restored from state file");
                self.install_session(saved.organization_id.map(OrganizationId::new));
                return Ok(AccessTokenLoginResponse {
                    authenticated: true,
                });
            }
        }

        let claims = token::verify(&request.access_token)?;
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        debug!("credential exchanged");

        if let Some(path) = &request.state_file {
            if let Err(err) = state::persist(path, &request.access_token, claims.organization.as_deref())
            {
                warn!(error = %err, "failed to persist session state");
            }
        }

        self.install_session(claims.organization.map(OrganizationId::new));
        Ok(AccessTokenLoginResponse {
            authenticated: true,
        })
    }

    fn install_session(&self, organization_id: Option<OrganizationId>) {
        *self
            .session
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some(CoreSession { organization_id });
    }

    fn require_session(&self) -> Result<CoreSession, CoreError> {
        self.session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
            .ok_or(CoreError::NotAuthenticated)
    }
}

impl Default for FakeVaultCore {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultCore for FakeVaultCore {
    fn execute(&self, payload: &str) -> Result<String, TransportError> {
        self.commands.fetch_add(1, Ordering::SeqCst);

        let command: Command =
            serde_json::from_str(payload).map_err(|e| TransportError::Core {
                reason: format!("invalid command envelope: {e}"),
            })?;

        debug!(command = command.name(), "handling command");
        Ok(self.dispatch(command))
    }

    fn shutdown(&self) {
        debug!("vault core shut down");
    }
}

impl std::fmt::Debug for FakeVaultCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeVaultCore")
            .field("settings", &self.settings)
            .field("commands", &self.commands_received())
            .finish_non_exhaustive()
    }
}

/// Wraps a handler outcome in a serialized response envelope.
fn respond<T: Serialize>(result: Result<T, CoreError>) -> String {
    let raw = match result {
        Ok(data) => serde_json::to_string(&Response::ok(data)),
        Err(err) => {
            debug!(error = %err, "command rejected");
            serde_json::to_string(&Response::<()>::error(err.to_string()))
        }
    };
    raw.unwrap_or_else(|_| {
        r#"{"success":false,"errorMessage":"response serialization failed"}"#.to_string()
    })
}
