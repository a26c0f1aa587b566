use chrono::{DateTime, Utc};

/// Wall-clock source. The engine reads time only through this trait so
/// ticks can be driven deterministically in tests.
pub trait IClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl IClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
