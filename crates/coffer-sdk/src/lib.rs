//! # coffer-sdk
//!
//! Typed client for a Coffer secrets-vault core.
//!
//! A [`Client`] owns one vault engine handle and one session. After a
//! single access-token login it exposes the Projects, Secrets, and
//! Generators resource clients, whose every call travels one path:
//!
//! ```text
//! resource client ──► Command envelope ──► CommandRunner ──► vault core
//!                                                               │
//!       typed result ◄── response discriminator ◄── raw response┘
//! ```
//!
//! Mutating and listing Projects operations are scoped to the organization
//! identity embedded in the access token's claims; they resolve it locally
//! and fail fast before contacting the core. Secrets and Generators are
//! scope-independent. All calls are synchronous and blocking; errors are
//! never swallowed, retried, or defaulted.
//!
//! The engine itself (cryptography, storage, backend protocol) sits
//! behind the [`VaultCore`] trait and is out of scope here. The
//! `coffer-fake-core` crate provides an in-process implementation for
//! tests and demos.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod core;
pub mod error;
pub mod generators;
pub mod projects;
pub mod runner;
pub mod secrets;
mod session;

pub use crate::client::Client;
pub use crate::core::VaultCore;
pub use crate::error::{AuthError, DomainError, Error, Result, TransportError};
pub use crate::generators::GeneratorsClient;
pub use crate::projects::ProjectsClient;
pub use crate::runner::CommandRunner;
pub use crate::secrets::SecretsClient;
pub use crate::session::Session;
