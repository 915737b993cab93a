//! The Secrets resource client.

use chrono::{DateTime, Utc};
use coffer_proto::{
    Command, ProjectId, SecretId, SecretIdentifiersResponse, SecretResponse,
    SecretsDeleteResponse, SecretsResponse, SecretsSyncResponse,
};

use crate::client::Client;
use crate::core::VaultCore;
use crate::error::Result;

/// Stateless facade over secret operations.
///
/// Secrets are scoped by the machine identity itself: every operation
/// requires a completed login (and fails fast without one), but none
/// consults the organization claim. A secret may belong to any number of
/// projects; an empty assignment means "unassigned", not an error.
pub struct SecretsClient<'a, C: VaultCore> {
    client: &'a Client<C>,
}

impl<'a, C: VaultCore> SecretsClient<'a, C> {
    pub(crate) const fn new(client: &'a Client<C>) -> Self {
        Self { client }
    }

    /// Creates a secret.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure.
    pub fn create(
        &self,
        key: &str,
        value: &str,
        note: &str,
        project_ids: Vec<ProjectId>,
    ) -> Result<SecretResponse> {
        self.client
            .run_session_command(&Command::secret_create(key, value, note, project_ids))
    }

    /// Retrieves a secret by id, including its material.
    ///
    /// For several secrets, prefer [`get_by_ids`](Self::get_by_ids) to
    /// avoid one round-trip per secret.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure; unknown ids come back as
    /// a reported domain error.
    pub fn get(&self, id: &SecretId) -> Result<SecretResponse> {
        self.client.run_session_command(&Command::secret_get(id.clone()))
    }

    /// Retrieves several secrets in one round-trip.
    ///
    /// The bulk-hydration path for identifiers obtained from
    /// [`list`](Self::list): the same set of entities comes back, in no
    /// particular order. An empty id list yields an empty result set.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure.
    pub fn get_by_ids(&self, ids: Vec<SecretId>) -> Result<SecretsResponse> {
        self.client.run_session_command(&Command::secrets_get_by_ids(ids))
    }

    /// Lists lightweight secret identifiers: id and name, no material.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure.
    pub fn list(&self) -> Result<SecretIdentifiersResponse> {
        self.client.run_session_command(&Command::secrets_list())
    }

    /// Replaces a secret's contents and project assignment.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure.
    pub fn update(
        &self,
        id: &SecretId,
        key: &str,
        value: &str,
        note: &str,
        project_ids: Vec<ProjectId>,
    ) -> Result<SecretResponse> {
        self.client.run_session_command(&Command::secret_update(
            id.clone(),
            key,
            value,
            note,
            project_ids,
        ))
    }

    /// Deletes secrets by id, reporting a per-id outcome.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure. Individual unknown ids do
    /// not fail the call; they carry an error slot in the response.
    pub fn delete(&self, ids: Vec<SecretId>) -> Result<SecretsDeleteResponse> {
        self.client.run_session_command(&Command::secrets_delete(ids))
    }

    /// Fetches secrets changed since the given instant; everything when
    /// absent.
    ///
    /// # Errors
    ///
    /// Surfaces any transport or domain failure.
    pub fn sync(&self, last_synced_date: Option<DateTime<Utc>>) -> Result<SecretsSyncResponse> {
        self.client
            .run_session_command(&Command::secrets_sync(last_synced_date))
    }
}
