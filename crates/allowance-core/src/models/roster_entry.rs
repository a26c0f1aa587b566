use serde::{Deserialize, Serialize};

/// One member of the remote family roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub external_id: String,
    pub display_name: String,
    pub avatar_ref: Option<String>,
    /// Only managed children carry a screen-time allowance.
    pub is_managed_child: bool,
}
