//! Single SQLite connection behind a mutex. All writes are serialized.

pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use pricewise_core::errors::{PricingResult, StorageError};

use crate::to_storage_err;
use pragmas::apply_pragmas;

pub struct DbConnection {
    conn: Mutex<Connection>,
}

impl DbConnection {
    /// Open a connection to the given database path.
    pub fn open(path: &Path) -> PricingResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> PricingResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the lock and execute a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> PricingResult<T>
    where
        F: FnOnce(&Connection) -> PricingResult<T>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::LockPoisoned {
            resource: "sqlite connection".to_string(),
        })?;
        f(&guard)
    }
}
