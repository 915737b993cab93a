//! Command dispatch to the native core.

use coffer_proto::Command;
use tracing::debug;

use crate::core::VaultCore;
use crate::error::TransportError;

/// Sends one serialized envelope to the vault core and returns the raw
/// response payload.
///
/// Owns the core handle for the lifetime of its client. Transport errors
/// cover only the boundary crossing; domain errors come back inside a
/// successful raw response and are resolved by the response discriminator.
pub struct CommandRunner<C> {
    core: C,
}

impl<C: VaultCore> CommandRunner<C> {
    /// Wraps a vault core handle.
    #[must_use]
    pub const fn new(core: C) -> Self {
        Self { core }
    }

    /// Serializes the envelope and invokes the core synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] when the envelope cannot be
    /// serialized and [`TransportError::Core`] when the engine fails.
    pub fn run(&self, command: &Command) -> Result<String, TransportError> {
        let payload = serde_json::to_string(command).map_err(|e| TransportError::Encode {
            reason: e.to_string(),
        })?;

        debug!(command = command.name(), "dispatching command");
        self.core.execute(&payload)
    }

    /// Returns the owned core handle.
    pub(crate) const fn core(&self) -> &C {
        &self.core
    }
}
