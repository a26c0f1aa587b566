//! Transport layer: the request seam and the versioned wire protocol.

pub mod http_transport;
pub mod protocol;

use async_trait::async_trait;

use allowance_core::errors::SyncResult;

pub use http_transport::HttpTransport;

/// One authenticated JSON POST against the remote service.
///
/// Implementations map 401/403 to `NotAuthenticated`, other non-success
/// statuses to `Remote`, and connection failures to `Network`. They make
/// exactly one attempt.
#[async_trait]
pub trait ITransport: Send + Sync {
    async fn post(
        &self,
        path: &str,
        bearer: &str,
        body: serde_json::Value,
    ) -> SyncResult<serde_json::Value>;
}
