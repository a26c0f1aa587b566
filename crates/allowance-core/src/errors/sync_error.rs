use super::{ConfigError, StorageError};

/// Every failure the sync engine and the remote client can report.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Credential missing, expired, or rejected by the remote (401/403).
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("remote error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("remote call timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("push for {external_id} was not accepted by the remote")]
    PushRejected { external_id: String },

    #[error("malformed remote response: {reason}")]
    Decode { reason: String },

    #[error("link not found: {external_id}")]
    LinkNotFound { external_id: String },

    #[error("local entity {local_id} is already linked to {external_id}")]
    LocalAlreadyLinked {
        local_id: String,
        external_id: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Whether the next tick may reasonably succeed with the same inputs.
    ///
    /// Timeouts, connection failures and 5xx responses are retryable.
    /// Auth failures wait for a new credential; other 4xx are terminal
    /// for the call that produced them.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Timeout { .. } | SyncError::Network { .. } => true,
            SyncError::Remote { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            _ => false,
        }
    }

    /// Whether this error means the credential must be refreshed out-of-band.
    pub fn needs_reauthentication(&self) -> bool {
        matches!(self, SyncError::NotAuthenticated)
    }
}
