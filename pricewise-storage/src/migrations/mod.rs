//! Schema migrations using PRAGMA user_version.

pub mod v001_initial_schema;

use rusqlite::Connection;

use pricewise_core::errors::{PricingResult, StorageError};

use crate::to_storage_err;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> PricingResult<()> {
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[(v001_initial_schema::MIGRATION_SQL, 1)];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> PricingResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
