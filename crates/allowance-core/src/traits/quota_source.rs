use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::Quota;

/// Local quota tracker.
///
/// `None` means "no data for this entity right now": the engine skips it
/// for the current tick instead of treating it as an error.
pub trait IQuotaSource: Send + Sync {
    fn get_quota(&self, local_id: &str) -> Option<Quota>;
}

/// Quota table updated by whatever tracks usage locally.
#[derive(Debug, Default)]
pub struct InMemoryQuotaSource {
    quotas: RwLock<HashMap<String, Quota>>,
}

impl InMemoryQuotaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, local_id: impl Into<String>, quota: Quota) {
        self.quotas
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(local_id.into(), quota);
    }

    pub fn remove(&self, local_id: &str) -> Option<Quota> {
        self.quotas
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(local_id)
    }
}

impl IQuotaSource for InMemoryQuotaSource {
    fn get_quota(&self, local_id: &str) -> Option<Quota> {
        self.quotas
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(local_id)
            .copied()
    }
}
