//! Ledger database connection wrapper.
//!
//! [`LedgerDb`] owns a DuckDB [`Connection`] and exposes the storage
//! lifecycle the host application drives at deployment time:
//! [`LedgerDb::initialize_storage`] and [`LedgerDb::teardown_storage`].

use crate::ddl::{CREATE_LEDGER, DROP_LEDGER, TABLE_NAME};
use crate::error::{LedgerError, LedgerResult};
use duckdb::Connection;
use std::path::Path;

/// Wrapper around a DuckDB connection holding the ledger table.
///
/// Single-threaded: runs are sequential, so no `Mutex` is needed.
pub struct LedgerDb {
    conn: Connection,
}

impl LedgerDb {
    /// Open (or create) the database at `path`.
    ///
    /// Does not create the ledger table; see [`Self::initialize_storage`].
    pub fn open(path: &Path) -> LedgerResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| LedgerError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Create an in-memory database.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| LedgerError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Borrow the underlying DuckDB connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open a second connection to the same database.
    ///
    /// SQL artifacts run on this connection so their side effects land in
    /// the database the ledger lives in, including in-memory databases.
    pub fn try_clone_connection(&self) -> LedgerResult<Connection> {
        self.conn
            .try_clone()
            .map_err(|e| LedgerError::ConnectionError(format!("clone failed: {e}")))
    }

    /// Create the ledger table if it does not exist.
    pub fn initialize_storage(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(CREATE_LEDGER)
            .map_err(|e| LedgerError::SchemaError(format!("create {TABLE_NAME}: {e}")))?;
        log::info!("Ledger table {TABLE_NAME} is ready");
        Ok(())
    }

    /// Drop the ledger table unconditionally. All recorded runs are lost.
    pub fn teardown_storage(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(DROP_LEDGER)
            .map_err(|e| LedgerError::SchemaError(format!("drop {TABLE_NAME}: {e}")))?;
        log::info!("Ledger table {TABLE_NAME} dropped");
        Ok(())
    }

    /// True when the ledger table exists.
    pub fn is_installed(&self) -> LedgerResult<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = ?",
                duckdb::params![TABLE_NAME],
                |row| row.get(0),
            )
            .map_err(|e| LedgerError::QueryError(format!("check {TABLE_NAME}: {e}")))?;
        Ok(count > 0)
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
