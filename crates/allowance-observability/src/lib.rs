//! # allowance-observability
//!
//! Subscriber installation and the span vocabulary used by the engine.

pub mod tracing_setup;

pub use tracing_setup::init_tracing;
