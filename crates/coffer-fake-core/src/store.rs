//! In-memory project and secret stores.
//!
//! Records live in `RwLock<HashMap>`s; ids are minted here and nowhere
//! else. Responses are built fresh on every call so callers never observe
//! internal state.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use coffer_proto::{
    OrganizationId, ProjectDeleteResponse, ProjectId, ProjectResponse, ProjectsDeleteResponse,
    ProjectsResponse, SecretCreateRequest, SecretDeleteResponse, SecretId,
    SecretIdentifierResponse, SecretIdentifiersResponse, SecretPutRequest, SecretResponse,
    SecretsDeleteResponse, SecretsResponse, SecretsSyncResponse,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone)]
struct ProjectRecord {
    organization_id: OrganizationId,
    name: String,
    creation_date: DateTime<Utc>,
    revision_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SecretRecord {
    organization_id: Option<OrganizationId>,
    project_ids: Vec<ProjectId>,
    key: String,
    value: String,
    note: String,
    creation_date: DateTime<Utc>,
    revision_date: DateTime<Utc>,
}

/// The in-memory vault contents.
pub(crate) struct VaultStore {
    projects: RwLock<HashMap<ProjectId, ProjectRecord>>,
    secrets: RwLock<HashMap<SecretId, SecretRecord>>,
}

impl VaultStore {
    pub(crate) fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            secrets: RwLock::new(HashMap::new()),
        }
    }

    // ===================
    // Projects
    // ===================

    pub(crate) fn create_project(
        &self,
        organization_id: OrganizationId,
        name: String,
    ) -> ProjectResponse {
        let id = ProjectId::new(Uuid::new_v4().to_string());
        let now = Utc::now();
        let record = ProjectRecord {
            organization_id,
            name,
            creation_date: now,
            revision_date: now,
        };

        let response = project_response(&id, &record);
        self.projects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(id.clone(), record);
        debug!(project = %id, "project created");
        response
    }

    pub(crate) fn get_project(&self, id: &ProjectId) -> Result<ProjectResponse, CoreError> {
        let projects = self
            .projects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = projects.get(id).ok_or_else(|| CoreError::ProjectNotFound {
            id: id.to_string(),
        })?;
        Ok(project_response(id, record))
    }

    pub(crate) fn update_project(
        &self,
        id: &ProjectId,
        name: String,
    ) -> Result<ProjectResponse, CoreError> {
        let mut projects = self
            .projects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = projects
            .get_mut(id)
            .ok_or_else(|| CoreError::ProjectNotFound {
                id: id.to_string(),
            })?;

        record.name = name;
        record.revision_date = Utc::now();
        debug!(project = %id, "project updated");
        Ok(project_response(id, record))
    }

    pub(crate) fn list_projects(&self, organization_id: &OrganizationId) -> ProjectsResponse {
        let projects = self
            .projects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let data = projects
            .iter()
            .filter(|(_, record)| &record.organization_id == organization_id)
            .map(|(id, record)| project_response(id, record))
            .collect();
        ProjectsResponse { data }
    }

    pub(crate) fn delete_projects(&self, ids: &[ProjectId]) -> ProjectsDeleteResponse {
        let mut projects = self
            .projects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let data = ids
            .iter()
            .map(|id| ProjectDeleteResponse {
                id: id.clone(),
                error: match projects.remove(id) {
                    Some(_) => None,
                    None => Some(format!("project not found: {id}")),
                },
            })
            .collect();
        ProjectsDeleteResponse { data }
    }

    // ===================
    // Secrets
    // ===================

    pub(crate) fn create_secret(
        &self,
        organization_id: Option<OrganizationId>,
        request: SecretCreateRequest,
    ) -> SecretResponse {
        let id = SecretId::new(Uuid::new_v4().to_string());
        let now = Utc::now();
        let record = SecretRecord {
            organization_id,
            project_ids: request.project_ids,
            key: request.key,
            value: request.value,
            note: request.note,
            creation_date: now,
            revision_date: now,
        };

        let response = secret_response(&id, &record);
        self.secrets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(id.clone(), record);
        debug!(secret = %id, "secret created");
        response
    }

    pub(crate) fn get_secret(&self, id: &SecretId) -> Result<SecretResponse, CoreError> {
        let secrets = self
            .secrets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = secrets.get(id).ok_or_else(|| CoreError::SecretNotFound {
            id: id.to_string(),
        })?;
        Ok(secret_response(id, record))
    }

    /// Returns the secrets that exist among `ids`. Unknown ids are
    /// silently skipped: the call hydrates a previously listed set, it
    /// does not probe for existence.
    pub(crate) fn get_secrets_by_ids(&self, ids: &[SecretId]) -> SecretsResponse {
        let secrets = self
            .secrets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let data = ids
            .iter()
            .filter_map(|id| secrets.get(id).map(|record| secret_response(id, record)))
            .collect();
        SecretsResponse { data }
    }

    pub(crate) fn list_secrets(&self) -> SecretIdentifiersResponse {
        let secrets = self
            .secrets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let data = secrets
            .iter()
            .map(|(id, record)| SecretIdentifierResponse {
                id: id.clone(),
                key: record.key.clone(),
            })
            .collect();
        SecretIdentifiersResponse { data }
    }

    pub(crate) fn update_secret(
        &self,
        request: SecretPutRequest,
    ) -> Result<SecretResponse, CoreError> {
        let mut secrets = self
            .secrets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = secrets
            .get_mut(&request.id)
            .ok_or_else(|| CoreError::SecretNotFound {
                id: request.id.to_string(),
            })?;

        record.key = request.key;
        record.value = request.value;
        record.note = request.note;
        record.project_ids = request.project_ids;
        record.revision_date = Utc::now();
        debug!(secret = %request.id, "secret updated");
        Ok(secret_response(&request.id, record))
    }

    pub(crate) fn delete_secrets(&self, ids: &[SecretId]) -> SecretsDeleteResponse {
        let mut secrets = self
            .secrets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let data = ids
            .iter()
            .map(|id| SecretDeleteResponse {
                id: id.clone(),
                error: match secrets.remove(id) {
                    Some(_) => None,
                    None => Some(format!("secret not found: {id}")),
                },
            })
            .collect();
        SecretsDeleteResponse { data }
    }

    pub(crate) fn sync_secrets(&self, since: Option<DateTime<Utc>>) -> SecretsSyncResponse {
        let secrets = self
            .secrets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let changed: Vec<SecretResponse> = secrets
            .iter()
            .filter(|(_, record)| since.is_none_or(|instant| record.revision_date > instant))
            .map(|(id, record)| secret_response(id, record))
            .collect();

        SecretsSyncResponse {
            has_changes: !changed.is_empty(),
            secrets: if changed.is_empty() {
                None
            } else {
                Some(changed)
            },
        }
    }
}

fn project_response(id: &ProjectId, record: &ProjectRecord) -> ProjectResponse {
    ProjectResponse {
        id: id.clone(),
        organization_id: record.organization_id.clone(),
        name: record.name.clone(),
        creation_date: record.creation_date,
        revision_date: record.revision_date,
    }
}

fn secret_response(id: &SecretId, record: &SecretRecord) -> SecretResponse {
    SecretResponse {
        id: id.clone(),
        organization_id: record.organization_id.clone(),
        project_id: record.project_ids.first().cloned(),
        key: record.key.clone(),
        value: record.value.clone(),
        note: record.note.clone(),
        creation_date: record.creation_date,
        revision_date: record.revision_date,
    }
}
