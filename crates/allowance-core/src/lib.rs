//! # allowance-core
//!
//! Foundation crate for allowance sync.
//! Defines the data model, error taxonomy, config, and the traits the
//! engine uses to talk to its collaborators (quota source, credentials,
//! notifications, persistence, clock).

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AllowanceConfig;
pub use errors::{SyncError, SyncResult};
pub use models::{
    Credential, EntityLink, LimitSnapshot, Notification, Quota, RosterEntry, Severity, Snapshot,
    SyncState,
};
