//! Error types for the ledger.

use cv_core::VersionNumber;
use thiserror::Error;

/// Ledger storage errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open or create the database (L001).
    #[error("[L001] Ledger database connection failed: {0}")]
    ConnectionError(String),

    /// The ledger table does not exist; run `install` first (L002).
    #[error("[L002] Ledger table '{0}' is not installed")]
    NotInstalled(&'static str),

    /// Creating or dropping the ledger table failed (L003).
    #[error("[L003] Ledger schema change failed: {0}")]
    SchemaError(String),

    /// Reading the ledger failed (L004).
    #[error("[L004] Ledger query failed: {0}")]
    QueryError(String),

    /// A row for this version already exists (L005).
    #[error("[L005] Version {0} is already recorded in the ledger")]
    DuplicateVersion(VersionNumber),

    /// A row could not be written (L006).
    #[error("[L006] Ledger insert failed: {0}")]
    InsertError(String),

    /// A row violates the table's shape (L007).
    #[error("[L007] Invalid ledger row: {0}")]
    InvalidRow(String),

    /// DuckDB driver error with preserved source chain (L008).
    #[error("[L008] DuckDB error")]
    DuckDb(#[source] duckdb::Error),
}

/// Result type alias for [`LedgerError`].
pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<duckdb::Error> for LedgerError {
    fn from(err: duckdb::Error) -> Self {
        LedgerError::DuckDb(err)
    }
}

/// True when a DuckDB error reports a missing table.
///
/// duckdb::Error does not expose structured variants, so the message is
/// the only thing to classify on.
pub(crate) fn is_missing_table(err: &duckdb::Error) -> bool {
    let msg = err.to_string();
    msg.contains("Table with name") && msg.contains("does not exist")
}

/// True when a DuckDB error reports a unique/primary key violation.
pub(crate) fn is_unique_violation(err: &duckdb::Error) -> bool {
    let msg = err.to_string();
    msg.contains("Duplicate key") || msg.contains("unique constraint")
}
