//! The Generators resource client.

use coffer_proto::{Command, PasswordGeneratorRequest};

use crate::client::Client;
use crate::core::VaultCore;
use crate::error::Result;

/// Stateless facade over the core's generators.
///
/// A pure function of its request: no session or organization dependency,
/// and never fails due to session state. Infeasible constraint
/// combinations are rejected by the core and surfaced as a reported
/// domain error.
pub struct GeneratorsClient<'a, C: VaultCore> {
    client: &'a Client<C>,
}

impl<'a, C: VaultCore> GeneratorsClient<'a, C> {
    pub(crate) const fn new(client: &'a Client<C>) -> Self {
        Self { client }
    }

    /// Generates a password honoring the request's constraints.
    ///
    /// # Errors
    ///
    /// Surfaces any transport failure, and a reported domain error for
    /// infeasible constraints (zero length, no enabled character class,
    /// minimums exceeding the length).
    pub fn generate_password(&self, request: PasswordGeneratorRequest) -> Result<String> {
        self.client.run_command(&Command::generate_password(request))
    }
}
