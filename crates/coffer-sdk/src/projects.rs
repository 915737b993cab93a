//! The Projects resource client.

use coffer_proto::{Command, ProjectId, ProjectResponse, ProjectsDeleteResponse, ProjectsResponse};

use crate::client::Client;
use crate::core::VaultCore;
use crate::error::Result;

/// Stateless facade over project operations.
///
/// Every operation requires a completed login and fails fast without one.
/// `create`, `update`, and `list` are additionally tied to the
/// organization identity embedded in the session's access token; they
/// resolve it first and fail fast, without a core round-trip, when it
/// is missing. `get` and `delete` take globally-resolvable ids and need
/// no organization scope.
pub struct ProjectsClient<'a, C: VaultCore> {
    client: &'a Client<C>,
}

impl<'a, C: VaultCore> ProjectsClient<'a, C> {
    pub(crate) const fn new(client: &'a Client<C>) -> Self {
        Self { client }
    }

    /// Creates a project in the session's organization.
    ///
    /// # Errors
    ///
    /// Fails fast on a missing session or organization scope; otherwise
    /// surfaces any transport or domain failure.
    pub fn create(&self, name: &str) -> Result<ProjectResponse> {
        let organization_id = self.client.scope()?;
        self.client
            .run_session_command(&Command::project_create(organization_id, name))
    }

    /// Retrieves a project by id.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure; unknown ids come back as
    /// a reported domain error.
    pub fn get(&self, id: &ProjectId) -> Result<ProjectResponse> {
        self.client.run_session_command(&Command::project_get(id.clone()))
    }

    /// Renames a project in the session's organization.
    ///
    /// # Errors
    ///
    /// Fails fast on a missing session or organization scope; otherwise
    /// surfaces any transport or domain failure.
    pub fn update(&self, id: &ProjectId, name: &str) -> Result<ProjectResponse> {
        let organization_id = self.client.scope()?;
        self.client
            .run_session_command(&Command::project_update(id.clone(), organization_id, name))
    }

    /// Deletes projects by id, reporting a per-id outcome.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure. Individual unknown ids do
    /// not fail the call; they carry an error slot in the response.
    pub fn delete(&self, ids: Vec<ProjectId>) -> Result<ProjectsDeleteResponse> {
        self.client.run_session_command(&Command::projects_delete(ids))
    }

    /// Lists the projects of the session's organization.
    ///
    /// # Errors
    ///
    /// Fails fast on a missing session or organization scope; otherwise
    /// surfaces any transport or domain failure.
    pub fn list(&self) -> Result<ProjectsResponse> {
        let organization_id = self.client.scope()?;
        self.client
            .run_session_command(&Command::projects_list(organization_id))
    }
}
