//! Span definitions per operation: tick, entity evaluation, remote call.

/// Create a tick span.
#[macro_export]
macro_rules! tick_span {
    ($trigger:expr, $link_count:expr) => {
        tracing::info_span!("allowance.tick", trigger = %$trigger, links = $link_count)
    };
}

/// Create a per-entity evaluation span.
#[macro_export]
macro_rules! entity_span {
    ($external_id:expr, $local_id:expr) => {
        tracing::debug_span!("allowance.entity", external_id = %$external_id, local_id = %$local_id)
    };
}

/// Create a remote call span.
#[macro_export]
macro_rules! remote_span {
    ($operation:expr) => {
        tracing::debug_span!("allowance.remote", operation = %$operation)
    };
}
