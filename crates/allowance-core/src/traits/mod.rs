//! Seams between the sync core and its collaborators.

mod clock;
mod credential_provider;
mod notification_sink;
mod persistence;
mod quota_source;

pub use clock::{IClock, SystemClock};
pub use credential_provider::{ICredentialProvider, SharedCredential};
pub use notification_sink::{INotificationSink, TracingNotifier};
pub use persistence::{IPersistenceSink, MemoryPersistence};
pub use quota_source::{IQuotaSource, InMemoryQuotaSource};
