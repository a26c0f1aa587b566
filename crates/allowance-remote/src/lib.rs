//! # allowance-remote
//!
//! Client for the remote screen-time control service: roster, per-child
//! limit reads, and limit pushes.
//!
//! Every call is gated on a valid bearer credential, bounded by a timeout,
//! and made as a single attempt. Reads are served from TTL caches; a
//! successful push drops that child's cached limit so the next read is
//! never the pre-push value. Retry policy belongs to the caller.

pub mod auth;
pub mod cache;
pub mod client;
pub mod transport;

pub use auth::CredentialGate;
pub use cache::{CacheStats, RemoteCache};
pub use client::RemoteClient;
pub use transport::{HttpTransport, ITransport};
