use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EntityLink, SyncState};

/// Everything needed to resume with the same decision history after a
/// restart: every link and every entity's sync state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub links: Vec<EntityLink>,
    /// Keyed by local id.
    pub states: BTreeMap<String, SyncState>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.states.is_empty()
    }
}
