//! The [`Ledger`] trait and its DuckDB implementation.

use crate::connection::LedgerDb;
use crate::ddl::{MAX_FILE_NAME_LEN, TABLE_NAME};
use crate::error::{is_missing_table, is_unique_violation, LedgerError, LedgerResult};
use chrono::{DateTime, Utc};
use cv_core::{Version, VersionNumber};

/// One persisted ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// Surrogate key assigned by storage
    pub id: u64,
    /// Applied version number (unique)
    pub version_no: VersionNumber,
    /// Logical file name of the applied artifact
    pub file_name: String,
    /// When the row was inserted
    pub run_date: DateTime<Utc>,
}

impl From<LedgerRow> for Version {
    fn from(row: LedgerRow) -> Self {
        Version::from_ledger(row.version_no, row.file_name, row.run_date)
    }
}

/// Append-only record of applied versions.
pub trait Ledger {
    /// All rows, ordered by version number ascending.
    fn fetch_all(&self) -> LedgerResult<Vec<LedgerRow>>;

    /// Insert a row for `version_no`. `run_date` defaults to now.
    ///
    /// Fails with [`LedgerError::DuplicateVersion`] if the version is
    /// already recorded.
    fn record(&self, version_no: VersionNumber, file_name: &str) -> LedgerResult<()>;
}

impl Ledger for LedgerDb {
    fn fetch_all(&self) -> LedgerResult<Vec<LedgerRow>> {
        let mut stmt = self
            .conn()
            .prepare(
                "SELECT CAST(id AS BIGINT), CAST(version_no AS BIGINT), filename, epoch_us(run_date)
                 FROM system_config_versions
                 ORDER BY version_no",
            )
            .map_err(|e| {
                if is_missing_table(&e) {
                    LedgerError::NotInstalled(TABLE_NAME)
                } else {
                    LedgerError::QueryError(format!("prepare fetch_all: {e}"))
                }
            })?;

        let raw: Vec<(i64, i64, String, i64)> = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })
            .map_err(|e| LedgerError::QueryError(format!("query fetch_all: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LedgerError::QueryError(format!("collect fetch_all: {e}")))?;

        raw.into_iter()
            .map(|(id, version_no, file_name, micros)| {
                let version_no = VersionNumber::try_from(version_no).map_err(|_| {
                    LedgerError::InvalidRow(format!("version_no {version_no} out of range"))
                })?;
                let run_date = DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
                    LedgerError::InvalidRow(format!("run_date {micros} out of range"))
                })?;
                Ok(LedgerRow {
                    id: u64::try_from(id).unwrap_or_default(),
                    version_no,
                    file_name,
                    run_date,
                })
            })
            .collect()
    }

    fn record(&self, version_no: VersionNumber, file_name: &str) -> LedgerResult<()> {
        if file_name.chars().count() > MAX_FILE_NAME_LEN {
            return Err(LedgerError::InvalidRow(format!(
                "file name for version {version_no} exceeds {MAX_FILE_NAME_LEN} characters"
            )));
        }

        self.conn()
            .execute(
                "INSERT INTO system_config_versions (version_no, filename) VALUES (?, ?)",
                duckdb::params![i64::from(version_no), file_name],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    LedgerError::DuplicateVersion(version_no)
                } else if is_missing_table(&e) {
                    LedgerError::NotInstalled(TABLE_NAME)
                } else {
                    LedgerError::InsertError(format!("version {version_no}: {e}"))
                }
            })?;
        log::debug!("Recorded version {version_no} ({file_name}) in {TABLE_NAME}");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
