/// Persistence-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("unsupported knowledge schema version {found} (max supported {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}
