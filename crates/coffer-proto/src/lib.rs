//! # coffer-proto
//!
//! Wire protocol for the Coffer secrets-vault client: the command envelope
//! sent to the vault core, the response envelope coming back, and the
//! discrimination logic that turns a raw response into a typed value or a
//! classified failure.
//!
//! The envelope is an externally-tagged JSON object with camelCase keys:
//! exactly one resource family key (`projects`, `secrets`, `generators`,
//! `loginAccessToken`), whose value carries exactly one operation. Modeling
//! the envelope as nested sum types makes that invariant a property of the
//! type system rather than a runtime check.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod response;
pub mod types;

pub use command::{
    AccessTokenLoginRequest, Command, GeneratorsCommand, PasswordGeneratorRequest,
    ProjectCreateRequest, ProjectGetRequest, ProjectPutRequest, ProjectsCommand,
    ProjectsDeleteRequest, ProjectsListRequest, SecretCreateRequest, SecretGetRequest,
    SecretPutRequest, SecretsCommand, SecretsDeleteRequest, SecretsGetRequest,
    SecretsSyncRequest,
};
pub use error::DomainError;
pub use response::{
    decode_response, AccessTokenLoginResponse, ProjectDeleteResponse, ProjectResponse,
    ProjectsDeleteResponse, ProjectsResponse, Response, SecretDeleteResponse,
    SecretIdentifierResponse, SecretIdentifiersResponse, SecretResponse, SecretsDeleteResponse,
    SecretsResponse, SecretsSyncResponse,
};
pub use types::{ClientSettings, OrganizationId, ProjectId, SecretId};
