mod credential;
mod entity_link;
mod limit_snapshot;
mod notification;
mod quota;
mod roster_entry;
mod snapshot;
mod sync_state;

pub use credential::Credential;
pub use entity_link::EntityLink;
pub use limit_snapshot::LimitSnapshot;
pub use notification::{Notification, Severity};
pub use quota::Quota;
pub use roster_entry::RosterEntry;
pub use snapshot::Snapshot;
pub use sync_state::SyncState;
