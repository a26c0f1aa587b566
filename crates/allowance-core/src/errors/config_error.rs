/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {message}")]
    Io { message: String },

    #[error("failed to parse config: {message}")]
    Parse { message: String },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}
