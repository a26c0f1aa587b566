//! Tracing subscriber installation.
//!
//! `RUST_LOG` wins over the configured level when set.

pub mod spans;

use tracing_subscriber::EnvFilter;

use allowance_core::config::ObservabilityConfig;

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed (common in tests
/// and when embedded in a host process), which is not an error.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(&config.log_level);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logs {
        builder.json().flatten_event(true).try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.log_level, json = config.json_logs, "tracing initialized");
    }
    installed
}

/// Filter from `RUST_LOG`, falling back to the configured level and then
/// to `info` if the configured directive does not parse.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bogus_level_falls_back_without_panicking() {
        let _ = build_filter("definitely=not=a=directive[");
    }

    #[test]
    fn second_init_reports_already_installed() {
        let config = ObservabilityConfig::default();
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
