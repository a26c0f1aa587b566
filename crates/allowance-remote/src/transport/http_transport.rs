//! reqwest-backed transport: bearer auth, JSON in/out, gzip, one attempt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use allowance_core::config::RemoteConfig;
use allowance_core::errors::{SyncError, SyncResult};

use super::ITransport;

/// Body text longer than this is cut before it lands in an error message.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &RemoteConfig) -> SyncResult<Self> {
        let timeout = config.request_timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| SyncError::Network {
                reason: format!("failed to build http client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> SyncError {
        if e.is_timeout() {
            SyncError::Timeout {
                after_ms: self.timeout.as_millis() as u64,
            }
        } else {
            SyncError::Network {
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl ITransport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        bearer: &str,
        body: serde_json::Value,
    ) -> SyncResult<serde_json::Value> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(path, %request_id, "remote: POST");

        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(bearer)
            .header("X-Request-Id", &request_id)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<serde_json::Value>()
                .await
                .map_err(|e| SyncError::Decode {
                    reason: format!("deserialization failed: {e}"),
                });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(path, %status, "remote: credential rejected");
            return Err(SyncError::NotAuthenticated);
        }

        let mut message = resp.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
        }
        Err(SyncError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}
