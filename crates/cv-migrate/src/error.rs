//! Error types for cv-migrate

use cv_core::VersionNumber;
use cv_ledger::LedgerError;
use thiserror::Error;

/// Catalog-level errors. Either aborts the whole catalog build.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// V001: The versions directory could not be read
    #[error("[V001] Failed to scan versions directory '{path}': {source}")]
    Scan {
        path: String,
        source: std::io::Error,
    },

    /// V002: The ledger could not be read
    #[error("[V002] Ledger storage error: {0}")]
    Storage(#[from] LedgerError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Failure while executing one artifact. Never escapes the runner.
#[derive(Error, Debug)]
pub enum ExecutionFailure {
    /// X001: No file in the versions directory backs this version
    #[error("[X001] No artifact found for version {version_no} ({file_name}) in '{dir}'")]
    ArtifactMissing {
        version_no: VersionNumber,
        file_name: String,
        dir: String,
    },

    /// X002: The artifact could not be read
    #[error("[X002] Failed to read artifact '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// X003: The artifact template did not render
    #[error("[X003] Template render failed for '{path}': {message}")]
    Render { path: String, message: String },

    /// X004: The rendered SQL failed against the database
    #[error("[X004] SQL execution failed for '{path}': {message}")]
    Sql { path: String, message: String },

    /// X005: The artifact explicitly reported failure
    #[error("[X005] Artifact '{path}' reported failure: {message}")]
    Signalled { path: String, message: String },

    /// X006: The artifact process could not be started
    #[error("[X006] Failed to start '{program}' for '{path}': {source}")]
    Spawn {
        program: String,
        path: String,
        source: std::io::Error,
    },

    /// X007: The artifact process exited unsuccessfully
    #[error("[X007] Artifact '{path}' exited with {status}: {stderr}")]
    Command {
        path: String,
        status: String,
        stderr: String,
    },

    /// X008: The executor panicked
    #[error("[X008] Executor panicked while running '{path}': {message}")]
    Panicked { path: String, message: String },
}

/// Why a single version did not get applied.
#[derive(Error, Debug)]
pub enum VersionRunError {
    /// The artifact failed; nothing was recorded
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),

    /// The artifact ran but the ledger row could not be written
    #[error("[V003] Version {version_no} ran but could not be recorded: {source}")]
    Record {
        version_no: VersionNumber,
        source: LedgerError,
    },

    /// Only NEW versions may be executed
    #[error("[V004] Version {0} is not pending")]
    NotPending(VersionNumber),

    /// The versions directory could not be read while resolving the artifact
    #[error(transparent)]
    Scan(#[from] MigrateError),
}
