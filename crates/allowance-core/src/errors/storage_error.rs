/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("migration failed at v{version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("store lock poisoned")]
    Poisoned,
}
