use std::sync::RwLock;

use crate::models::Credential;

/// Supplies the current bearer credential. Refreshed out-of-band by the
/// login flow; the core never constructs one.
pub trait ICredentialProvider: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}

/// Credential slot the login flow writes into and the remote client reads.
#[derive(Debug, Default)]
pub struct SharedCredential {
    slot: RwLock<Option<Credential>>,
}

impl SharedCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }

    /// Install a freshly acquired credential.
    pub fn set(&self, credential: Credential) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(credential);
        tracing::info!("credential: installed new bearer token");
    }

    /// Forget the current credential (logout).
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl ICredentialProvider for SharedCredential {
    fn credential(&self) -> Option<Credential> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
