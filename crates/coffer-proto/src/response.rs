//! Response envelope and discrimination.
//!
//! The vault core answers every command with one envelope:
//! `{success, errorMessage?, data?}`. [`decode_response`] is the single
//! chokepoint that turns a raw response into a typed value or a
//! [`DomainError`]; no caller interprets raw bytes itself.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::{OrganizationId, ProjectId, SecretId};

/// The generic response envelope.
///
/// `success == true` iff `data` is present and well-formed for the expected
/// type; `success == false` iff `error_message` is present. Every other
/// combination is a protocol violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Response<T> {
    /// Whether the command succeeded.
    pub success: bool,
    /// The core's rejection message. Populated iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// The response payload. Populated iff `success` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            error_message: None,
            data: Some(data),
        }
    }

    /// Wraps a rejection message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            data: None,
        }
    }
}

/// Decodes a raw core response into the expected payload type.
///
/// This is the Response Discriminator: it resolves the envelope's success
/// flag first, then either decodes `data` into `T` or surfaces the core's
/// rejection. Parse failures at any stage (before the flag can be read,
/// a successful envelope without data, data of the wrong shape, a failed
/// envelope without a message) are [`DomainError::Malformed`].
///
/// # Errors
///
/// [`DomainError::Reported`] when the core rejected the operation;
/// [`DomainError::Malformed`] when the response violates the contract.
pub fn decode_response<T: DeserializeOwned>(raw: &str) -> Result<T, DomainError> {
    let envelope: Response<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| DomainError::Malformed(e.to_string()))?;

    if envelope.success {
        let data = envelope
            .data
            .ok_or_else(|| DomainError::Malformed("success response without data".to_string()))?;
        serde_json::from_value(data).map_err(|e| DomainError::Malformed(e.to_string()))
    } else {
        match envelope.error_message {
            Some(message) => Err(DomainError::Reported(message)),
            None => Err(DomainError::Malformed(
                "failure response without error message".to_string(),
            )),
        }
    }
}

/// Outcome of an access-token login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AccessTokenLoginResponse {
    /// Whether the core accepted the credential.
    pub authenticated: bool,
}

/// A project as reported by the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectResponse {
    /// The project's identifier.
    pub id: ProjectId,
    /// Organization the project belongs to.
    pub organization_id: OrganizationId,
    /// The project's name.
    pub name: String,
    /// When the project was created.
    pub creation_date: DateTime<Utc>,
    /// When the project was last modified.
    pub revision_date: DateTime<Utc>,
}

/// A list of projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectsResponse {
    /// The projects, in no particular order.
    pub data: Vec<ProjectResponse>,
}

/// Per-project outcome of a bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectDeleteResponse {
    /// The project the outcome refers to.
    pub id: ProjectId,
    /// Why this project could not be deleted, if it couldn't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcomes of a bulk project delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectsDeleteResponse {
    /// One outcome per requested id.
    pub data: Vec<ProjectDeleteResponse>,
}

/// A secret as reported by the core, with its material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretResponse {
    /// The secret's identifier.
    pub id: SecretId,
    /// Organization the secret belongs to, when the session carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    /// First project the secret is assigned to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    /// The secret's name.
    pub key: String,
    /// The secret material.
    pub value: String,
    /// Free-form note.
    pub note: String,
    /// When the secret was created.
    pub creation_date: DateTime<Utc>,
    /// When the secret was last modified.
    pub revision_date: DateTime<Utc>,
}

/// A list of full secrets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretsResponse {
    /// The secrets, in no particular order.
    pub data: Vec<SecretResponse>,
}

/// A lightweight secret identifier: id and name only, no material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretIdentifierResponse {
    /// The secret's identifier.
    pub id: SecretId,
    /// The secret's name.
    pub key: String,
}

/// A list of lightweight secret identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretIdentifiersResponse {
    /// The identifiers, in no particular order.
    pub data: Vec<SecretIdentifierResponse>,
}

/// Per-secret outcome of a bulk delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretDeleteResponse {
    /// The secret the outcome refers to.
    pub id: SecretId,
    /// Why this secret could not be deleted, if it couldn't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcomes of a bulk secret delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretsDeleteResponse {
    /// One outcome per requested id.
    pub data: Vec<SecretDeleteResponse>,
}

/// Result of a sync request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretsSyncResponse {
    /// Whether anything changed since the requested instant.
    pub has_changes: bool,
    /// The changed secrets. Populated iff `has_changes` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<SecretResponse>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn sample_project_json() -> String {
        serde_json::to_string(&Response::ok(ProjectResponse {
            id: ProjectId::new("p-1"),
            organization_id: OrganizationId::new("org-1"),
            name: "production".to_string(),
            creation_date: Utc::now(),
            revision_date: Utc::now(),
        }))
        .expect("serialize")
    }

    // ===================
    // Discriminator Tests
    // ===================

    #[test]
    fn decode_success_yields_typed_payload() {
        let raw = sample_project_json();
        let project: ProjectResponse = decode_response(&raw).expect("decode");
        assert_eq!(project.id, ProjectId::new("p-1"));
        assert_eq!(project.name, "production");
    }

    #[test]
    fn decode_failure_yields_reported_message() {
        let raw = serde_json::to_string(&Response::<ProjectResponse>::error(
            "project not found: p-9",
        ))
        .expect("serialize");

        let result: Result<ProjectResponse, _> = decode_response(&raw);
        assert_eq!(
            result.expect_err("should fail"),
            DomainError::Reported("project not found: p-9".to_string())
        );
    }

    #[test_case(r#"{"success": true}"# ; "success without data")]
    #[test_case(r#"{"success": true, "data": null}"# ; "success with null data")]
    #[test_case(r#"{"success": false}"# ; "failure without message")]
    #[test_case(r#"{"success": "yes"}"# ; "non boolean flag")]
    #[test_case(r#"{"data": {}}"# ; "missing flag")]
    #[test_case("not json at all" ; "unparseable")]
    #[test_case("" ; "empty")]
    fn decode_contract_violations_are_malformed(raw: &str) {
        let result: Result<ProjectResponse, _> = decode_response(raw);
        assert!(matches!(
            result.expect_err("should fail"),
            DomainError::Malformed(_)
        ));
    }

    #[test]
    fn decode_success_with_wrong_shape_is_malformed() {
        let raw = r#"{"success": true, "data": {"unexpected": 1}}"#;
        let result: Result<ProjectResponse, _> = decode_response(raw);
        assert!(matches!(
            result.expect_err("should fail"),
            DomainError::Malformed(_)
        ));
    }

    #[test]
    fn decode_never_coerces_failure_to_default() {
        // A failure envelope whose payload type happens to be decodable
        // from nothing must still surface the rejection.
        let raw = r#"{"success": false, "errorMessage": "denied", "data": []}"#;
        let result: Result<Vec<String>, _> = decode_response(raw);
        assert_eq!(
            result.expect_err("should fail"),
            DomainError::Reported("denied".to_string())
        );
    }

    proptest! {
        #[test]
        fn decode_arbitrary_input_never_panics(raw in ".*") {
            let _ = decode_response::<ProjectResponse>(&raw);
        }
    }

    // ===================
    // Envelope Tests
    // ===================

    #[test]
    fn ok_envelope_shape() {
        let value = serde_json::to_value(Response::ok("generated")).expect("serialize");
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], "generated");
        assert!(value.get("errorMessage").is_none());
    }

    #[test]
    fn error_envelope_shape() {
        let value =
            serde_json::to_value(Response::<String>::error("bad request")).expect("serialize");
        assert_eq!(value["success"], false);
        assert_eq!(value["errorMessage"], "bad request");
        assert!(value.get("data").is_none());
    }

    // ===================
    // Model Tests
    // ===================

    #[test]
    fn secret_response_roundtrip() {
        let secret = SecretResponse {
            id: SecretId::new("s-1"),
            organization_id: Some(OrganizationId::new("org-1")),
            project_id: None,
            key: "db-password".to_string(),
            value: "hunter2".to_string(),
            note: String::new(),
            creation_date: Utc::now(),
            revision_date: Utc::now(),
        };
        let json = serde_json::to_string(&secret).expect("serialize");
        let restored: SecretResponse = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, secret);
    }

    #[test]
    fn secret_identifier_carries_no_material() {
        let identifier = SecretIdentifierResponse {
            id: SecretId::new("s-1"),
            key: "db-password".to_string(),
        };
        let value = serde_json::to_value(&identifier).expect("serialize");
        assert!(value.get("value").is_none());
        assert_eq!(value["key"], "db-password");
    }

    #[test]
    fn sync_response_without_changes_omits_secrets() {
        let response = SecretsSyncResponse {
            has_changes: false,
            secrets: None,
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["hasChanges"], false);
        assert!(value.get("secrets").is_none());
    }
}
