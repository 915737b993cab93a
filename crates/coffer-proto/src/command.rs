//! Command envelope definitions.
//!
//! Every request to the vault core is one [`Command`]: an externally-tagged
//! union keyed by resource family, each family carrying exactly one
//! operation. Constructing an envelope with zero or multiple operations is
//! unrepresentable.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrganizationId, ProjectId, SecretId};

/// A single request to the vault core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Authenticate a machine identity with an access token.
    LoginAccessToken(AccessTokenLoginRequest),
    /// Project operations.
    Projects(ProjectsCommand),
    /// Secret operations.
    Secrets(SecretsCommand),
    /// Stateless generator operations.
    Generators(GeneratorsCommand),
}

/// Operations on the Projects resource family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ProjectsCommand {
    /// Retrieve a single project.
    Get(ProjectGetRequest),
    /// Create a project in an organization.
    Create(ProjectCreateRequest),
    /// List all projects of an organization.
    List(ProjectsListRequest),
    /// Rename a project.
    Update(ProjectPutRequest),
    /// Delete one or more projects.
    Delete(ProjectsDeleteRequest),
}

/// Operations on the Secrets resource family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum SecretsCommand {
    /// Retrieve a single secret.
    Get(SecretGetRequest),
    /// Retrieve several secrets in one round-trip.
    GetByIds(SecretsGetRequest),
    /// Create a secret.
    Create(SecretCreateRequest),
    /// List lightweight secret identifiers.
    List,
    /// Replace a secret's contents.
    Update(SecretPutRequest),
    /// Delete one or more secrets.
    Delete(SecretsDeleteRequest),
    /// Fetch secrets changed since a given instant.
    Sync(SecretsSyncRequest),
}

/// Generator operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum GeneratorsCommand {
    /// Generate a password from the given constraints.
    GeneratePassword(PasswordGeneratorRequest),
}

/// Login request carrying the machine access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessTokenLoginRequest {
    /// The machine access token.
    pub access_token: String,
    /// Where the core may persist session material across restarts. The
    /// file's format is owned by the core; this layer passes the path
    /// through unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,
}

/// Request to retrieve a single project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectGetRequest {
    /// The project to retrieve.
    pub id: ProjectId,
}

/// Request to create a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectCreateRequest {
    /// Organization the project will belong to.
    pub organization_id: OrganizationId,
    /// The new project's name.
    pub name: String,
}

/// Request to list all projects of an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectsListRequest {
    /// Organization to list projects from.
    pub organization_id: OrganizationId,
}

/// Request to rename a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectPutRequest {
    /// The project to modify.
    pub id: ProjectId,
    /// Organization the project belongs to.
    pub organization_id: OrganizationId,
    /// The project's new name.
    pub name: String,
}

/// Request to delete one or more projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectsDeleteRequest {
    /// The projects to delete.
    pub ids: Vec<ProjectId>,
}

/// Request to retrieve a single secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretGetRequest {
    /// The secret to retrieve.
    pub id: SecretId,
}

/// Request to retrieve several secrets at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretsGetRequest {
    /// The secrets to retrieve. May be empty, which yields an empty
    /// result set.
    pub ids: Vec<SecretId>,
}

/// Request to create a secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretCreateRequest {
    /// The secret's name.
    pub key: String,
    /// The secret material.
    pub value: String,
    /// Free-form note attached to the secret.
    pub note: String,
    /// Projects the secret is assigned to. Empty means unassigned.
    pub project_ids: Vec<ProjectId>,
}

/// Request to replace a secret's contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretPutRequest {
    /// The secret to modify.
    pub id: SecretId,
    /// The secret's new name.
    pub key: String,
    /// The new secret material.
    pub value: String,
    /// The new note.
    pub note: String,
    /// The new project assignment. Empty means unassigned.
    pub project_ids: Vec<ProjectId>,
}

/// Request to delete one or more secrets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretsDeleteRequest {
    /// The secrets to delete.
    pub ids: Vec<SecretId>,
}

/// Request for secrets changed since a given instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretsSyncRequest {
    /// Only report changes after this instant; absent means everything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_date: Option<DateTime<Utc>>,
}

/// Constraints for password generation.
///
/// Absent `min_*` fields mean "no minimum" and stay off the wire; an
/// explicit zero is transmitted as zero. The core guarantees at least one
/// character of every enabled class regardless of minimums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PasswordGeneratorRequest {
    /// Total password length.
    pub length: u8,
    /// Exclude characters easily confused for one another (l/I/1, O/0).
    pub avoid_ambiguous: bool,
    /// Include lowercase characters.
    pub lowercase: bool,
    /// Include uppercase characters.
    pub uppercase: bool,
    /// Include digits.
    pub numbers: bool,
    /// Include special characters.
    pub special: bool,
    /// Minimum number of lowercase characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_lowercase: Option<u8>,
    /// Minimum number of uppercase characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_uppercase: Option<u8>,
    /// Minimum number of digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_number: Option<u8>,
    /// Minimum number of special characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_special: Option<u8>,
}

impl Default for PasswordGeneratorRequest {
    fn default() -> Self {
        Self {
            length: 24,
            avoid_ambiguous: true,
            lowercase: true,
            uppercase: true,
            numbers: true,
            special: true,
            min_lowercase: None,
            min_uppercase: None,
            min_number: None,
            min_special: None,
        }
    }
}

impl Command {
    /// Dotted operation name, for diagnostics. Never includes payload data.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoginAccessToken(_) => "loginAccessToken",
            Self::Projects(command) => match command {
                ProjectsCommand::Get(_) => "projects.get",
                ProjectsCommand::Create(_) => "projects.create",
                ProjectsCommand::List(_) => "projects.list",
                ProjectsCommand::Update(_) => "projects.update",
                ProjectsCommand::Delete(_) => "projects.delete",
            },
            Self::Secrets(command) => match command {
                SecretsCommand::Get(_) => "secrets.get",
                SecretsCommand::GetByIds(_) => "secrets.getByIds",
                SecretsCommand::Create(_) => "secrets.create",
                SecretsCommand::List => "secrets.list",
                SecretsCommand::Update(_) => "secrets.update",
                SecretsCommand::Delete(_) => "secrets.delete",
                SecretsCommand::Sync(_) => "secrets.sync",
            },
            Self::Generators(GeneratorsCommand::GeneratePassword(_)) => {
                "generators.generatePassword"
            }
        }
    }

    /// Builds a login envelope.
    #[must_use]
    pub fn login_access_token(
        access_token: impl Into<String>,
        state_file: Option<PathBuf>,
    ) -> Self {
        Self::LoginAccessToken(AccessTokenLoginRequest {
            access_token: access_token.into(),
            state_file,
        })
    }

    /// Builds a project-get envelope.
    #[must_use]
    pub fn project_get(id: ProjectId) -> Self {
        Self::Projects(ProjectsCommand::Get(ProjectGetRequest { id }))
    }

    /// Builds a project-create envelope.
    #[must_use]
    pub fn project_create(organization_id: OrganizationId, name: impl Into<String>) -> Self {
        Self::Projects(ProjectsCommand::Create(ProjectCreateRequest {
            organization_id,
            name: name.into(),
        }))
    }

    /// Builds a projects-list envelope.
    #[must_use]
    pub fn projects_list(organization_id: OrganizationId) -> Self {
        Self::Projects(ProjectsCommand::List(ProjectsListRequest {
            organization_id,
        }))
    }

    /// Builds a project-update envelope.
    #[must_use]
    pub fn project_update(
        id: ProjectId,
        organization_id: OrganizationId,
        name: impl Into<String>,
    ) -> Self {
        Self::Projects(ProjectsCommand::Update(ProjectPutRequest {
            id,
            organization_id,
            name: name.into(),
        }))
    }

    /// Builds a projects-delete envelope.
    #[must_use]
    pub fn projects_delete(ids: Vec<ProjectId>) -> Self {
        Self::Projects(ProjectsCommand::Delete(ProjectsDeleteRequest { ids }))
    }

    /// Builds a secret-get envelope.
    #[must_use]
    pub fn secret_get(id: SecretId) -> Self {
        Self::Secrets(SecretsCommand::Get(SecretGetRequest { id }))
    }

    /// Builds a secrets-get-by-ids envelope.
    #[must_use]
    pub fn secrets_get_by_ids(ids: Vec<SecretId>) -> Self {
        Self::Secrets(SecretsCommand::GetByIds(SecretsGetRequest { ids }))
    }

    /// Builds a secret-create envelope.
    #[must_use]
    pub fn secret_create(
        key: impl Into<String>,
        value: impl Into<String>,
        note: impl Into<String>,
        project_ids: Vec<ProjectId>,
    ) -> Self {
        Self::Secrets(SecretsCommand::Create(SecretCreateRequest {
            key: key.into(),
            value: value.into(),
            note: note.into(),
            project_ids,
        }))
    }

    /// Builds a secrets-list envelope.
    #[must_use]
    pub const fn secrets_list() -> Self {
        Self::Secrets(SecretsCommand::List)
    }

    /// Builds a secret-update envelope.
    #[must_use]
    pub fn secret_update(
        id: SecretId,
        key: impl Into<String>,
        value: impl Into<String>,
        note: impl Into<String>,
        project_ids: Vec<ProjectId>,
    ) -> Self {
        Self::Secrets(SecretsCommand::Update(SecretPutRequest {
            id,
            key: key.into(),
            value: value.into(),
            note: note.into(),
            project_ids,
        }))
    }

    /// Builds a secrets-delete envelope.
    #[must_use]
    pub fn secrets_delete(ids: Vec<SecretId>) -> Self {
        Self::Secrets(SecretsCommand::Delete(SecretsDeleteRequest { ids }))
    }

    /// Builds a secrets-sync envelope.
    #[must_use]
    pub const fn secrets_sync(last_synced_date: Option<DateTime<Utc>>) -> Self {
        Self::Secrets(SecretsCommand::Sync(SecretsSyncRequest {
            last_synced_date,
        }))
    }

    /// Builds a password-generation envelope.
    #[must_use]
    pub const fn generate_password(request: PasswordGeneratorRequest) -> Self {
        Self::Generators(GeneratorsCommand::GeneratePassword(request))
    }
}
