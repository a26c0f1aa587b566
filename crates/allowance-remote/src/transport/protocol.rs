//! Wire shapes for the remote control service. Field names are camelCase.

use serde::{Deserialize, Serialize};

use allowance_core::errors::{SyncError, SyncResult};
use allowance_core::models::{LimitSnapshot, RosterEntry};

pub const ROSTER_PATH: &str = "/roster";
pub const LIMIT_PATH: &str = "/limit";
pub const PUSH_LIMIT_PATH: &str = "/limit/update";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub children: Vec<RosterItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_managed_child: bool,
}

impl From<RosterItem> for RosterEntry {
    fn from(item: RosterItem) -> Self {
        RosterEntry {
            external_id: item.id,
            display_name: item.name,
            avatar_ref: item.avatar,
            is_managed_child: item.is_managed_child,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitResponse {
    pub enabled: bool,
    pub daily_limit_minutes: u32,
    pub used_minutes: u32,
}

impl LimitResponse {
    pub fn into_snapshot(self, external_id: &str) -> LimitSnapshot {
        LimitSnapshot::new(
            external_id,
            self.enabled,
            self.daily_limit_minutes,
            self.used_minutes,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushLimitRequest {
    pub id: String,
    pub daily_limit_minutes: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushLimitResponse {
    pub accepted: bool,
}

/// Serialize a request body.
pub fn encode<T: Serialize>(request: &T) -> SyncResult<serde_json::Value> {
    serde_json::to_value(request).map_err(|e| SyncError::Decode {
        reason: format!("request encoding failed: {e}"),
    })
}

/// Deserialize a response body.
pub fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> SyncResult<T> {
    serde_json::from_value(value).map_err(|e| SyncError::Decode {
        reason: e.to_string(),
    })
}
