//! # allowance-sync
//!
//! Keeps each linked child's remote screen-time limit in agreement with the
//! local quota. The [`strategy`] decides whether a push is due, the
//! [`store`] owns links and last-push state, and the [`engine`] drives
//! both on a timer or on demand. The [`runtime`] wires them to SQLite
//! and the HTTP transport.

pub mod engine;
pub mod runtime;
pub mod store;
pub mod strategy;

pub use engine::{
    AuthStatus, EngineStatus, EntityOutcome, EntityResult, SyncEngine, TickReport, TickSummary,
    TickTrigger,
};
pub use runtime::{AllowanceRuntime, RuntimeOptions};
pub use store::SyncStore;
pub use strategy::{decide, Decision, DecisionReason};
