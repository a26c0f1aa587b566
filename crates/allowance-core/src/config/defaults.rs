// Single source of truth for all default values.

// --- Sync ---
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_NORMAL_INTERVAL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_AGGRESSIVE_INTERVAL_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_AGGRESSIVE_THRESHOLD_MINUTES: u32 = 30;
pub const DEFAULT_LOW_ALLOWANCE_MINUTES: u32 = 10;

// --- Remote ---
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ROSTER_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_LIMIT_TTL_SECS: u64 = 300; // 5 minutes

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "allowance.db";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
