//! Session state-file persistence.
//!
//! The state file's format is owned entirely by this crate; the client
//! only passes the path through. It stores a fingerprint of the access
//! token plus the session material derived at exchange time, so a later
//! process presenting the same token at the same path can skip a full
//! exchange.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionState {
    /// Blake3 fingerprint of the access token the session was minted for.
    pub token_fingerprint: String,
    /// Organization identity carried by the token at exchange time.
    pub organization_id: Option<String>,
    /// When the full exchange happened.
    pub exchanged_at: DateTime<Utc>,
}

pub(crate) fn fingerprint(access_token: &str) -> String {
    blake3::hash(access_token.as_bytes()).to_hex().to_string()
}

/// Loads persisted session material if it matches the presented token.
///
/// Any unreadable, unparseable, or mismatching file means "no saved
/// session"; the caller falls back to a full exchange.
pub(crate) fn restore(path: &Path, access_token: &str) -> Option<SessionState> {
    let content = fs::read_to_string(path).ok()?;
    let state: SessionState = serde_json::from_str(&content).ok()?;
    (state.token_fingerprint == fingerprint(access_token)).then_some(state)
}

/// Writes session material for the presented token.
pub(crate) fn persist(
    path: &Path,
    access_token: &str,
    organization_id: Option<&str>,
) -> io::Result<()> {
    let state = SessionState {
        token_fingerprint: fingerprint(access_token),
        organization_id: organization_id.map(ToString::to_string),
        exchanged_at: Utc::now(),
    };
    let content = serde_json::to_string_pretty(&state).map_err(io::Error::other)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_then_restore_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        persist(&path, "token-a", Some("org-1")).expect("persist");

        let state = restore(&path, "token-a").expect("restore");
        assert_eq!(state.organization_id.as_deref(), Some("org-1"));
        assert_eq!(state.token_fingerprint, fingerprint("token-a"));
    }

    #[test]
    fn restore_rejects_different_token() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");

        persist(&path, "token-a", Some("org-1")).expect("persist");

        assert!(restore(&path, "token-b").is_none());
    }

    #[test]
    fn restore_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(restore(&dir.path().join("absent.json"), "token").is_none());
    }

    #[test]
    fn restore_corrupt_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").expect("write");

        assert!(restore(&path, "token").is_none());
    }

    #[test]
    fn persist_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deep").join("state.json");

        persist(&path, "token", None).expect("persist");
        assert!(restore(&path, "token").is_some());
    }
}
