mod config_error;
mod storage_error;
mod sync_error;

pub use config_error::ConfigError;
pub use storage_error::StorageError;
pub use sync_error::SyncError;

/// Convenience alias used across the workspace.
pub type SyncResult<T> = Result<T, SyncError>;
