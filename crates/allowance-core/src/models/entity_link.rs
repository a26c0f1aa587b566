use serde::{Deserialize, Serialize};

/// Association between a remote-system identifier and the local identifier
/// of the same managed person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityLink {
    /// Identifier on the remote control service. Unique across links.
    pub external_id: String,
    /// Identifier the quota source knows the entity by.
    pub local_id: String,
}

impl EntityLink {
    pub fn new(external_id: impl Into<String>, local_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            local_id: local_id.into(),
        }
    }
}
