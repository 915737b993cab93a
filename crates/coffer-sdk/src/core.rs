//! The native-core boundary.
//!
//! Everything behind this trait (cryptography, storage, the network
//! protocol to the backend service) is an opaque collaborator. The client
//! reaches it only through one synchronous serialized exchange.

use std::sync::Arc;

use crate::error::TransportError;

/// A handle to a vault engine.
///
/// Implementations are constructed with
/// [`ClientSettings`](coffer_proto::ClientSettings); absent URL overrides
/// mean the engine's built-in defaults.
pub trait VaultCore: Send + Sync {
    /// Executes one serialized command envelope and returns the raw
    /// serialized response envelope.
    ///
    /// Blocking from the caller's perspective, even if the engine performs
    /// internal asynchronous work.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only for boundary-crossing failures.
    /// Domain rejections travel inside a successful raw response.
    fn execute(&self, payload: &str) -> Result<String, TransportError>;

    /// Releases the engine. Must be safe to call more than once and after
    /// prior failures; the client handle invokes it at most once itself.
    fn shutdown(&self);
}

impl<C: VaultCore + ?Sized> VaultCore for Arc<C> {
    fn execute(&self, payload: &str) -> Result<String, TransportError> {
        (**self).execute(payload)
    }

    fn shutdown(&self) {
        (**self).shutdown();
    }
}
