//! # coffer-fake-core
//!
//! An in-process vault core for Coffer tests and demos.
//!
//! The real engine behind a Coffer client (cryptography, storage, the
//! backend protocol) is out of the client's scope. This crate stands in
//! for it so the full command/response contract can be exercised
//! end-to-end: access-token login with optional state-file persistence,
//! project and secret CRUD over in-memory stores, and password
//! generation.
//!
//! Nothing here is suitable for protecting real secrets: values are kept
//! in memory in the clear and tokens are verified structurally only.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod core;
mod error;
mod generator;
mod state;
mod store;
mod token;

pub use crate::core::FakeVaultCore;
pub use crate::token::mint_access_token;
