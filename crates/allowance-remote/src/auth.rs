//! Credential gate: every remote call asks here first.

use std::sync::Arc;

use allowance_core::errors::{SyncError, SyncResult};
use allowance_core::traits::{IClock, ICredentialProvider};

/// Checks the current credential against the clock.
#[derive(Clone)]
pub struct CredentialGate {
    provider: Arc<dyn ICredentialProvider>,
    clock: Arc<dyn IClock>,
}

impl CredentialGate {
    pub fn new(provider: Arc<dyn ICredentialProvider>, clock: Arc<dyn IClock>) -> Self {
        Self { provider, clock }
    }

    /// True iff a credential is present and `now < expires_at`.
    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_ok()
    }

    /// The bearer token to attach, or `NotAuthenticated`.
    pub fn bearer(&self) -> SyncResult<String> {
        match self.provider.credential() {
            Some(cred) if cred.is_valid_at(self.clock.now()) => Ok(cred.token),
            Some(cred) => {
                tracing::debug!(expires_at = %cred.expires_at, "auth: credential expired");
                Err(SyncError::NotAuthenticated)
            }
            None => Err(SyncError::NotAuthenticated),
        }
    }
}

impl std::fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGate")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
