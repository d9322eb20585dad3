//! Version records: one migration unit and its lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier and primary sort key of a migration.
pub type VersionNumber = u32;

/// Lifecycle status of a [`Version`] relative to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    /// Not yet classified. Never observed outside catalog construction.
    #[default]
    Undefined,
    /// Present in the ledger.
    Done,
    /// Present on disk but not in the ledger.
    New,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionStatus::Undefined => write!(f, "undefined"),
            VersionStatus::Done => write!(f, "done"),
            VersionStatus::New => write!(f, "new"),
        }
    }
}

/// A single migration version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Version {
    /// Unique version number
    pub version_no: VersionNumber,

    /// Logical name, without the number prefix or extension
    pub file_name: String,

    /// When the version was applied; `None` unless it is in the ledger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_date: Option<DateTime<Utc>>,

    /// Lifecycle status
    pub status: VersionStatus,
}

impl Version {
    /// Build a version from a ledger row.
    pub fn from_ledger(
        version_no: VersionNumber,
        file_name: impl Into<String>,
        run_date: DateTime<Utc>,
    ) -> Self {
        Self {
            version_no,
            file_name: file_name.into(),
            run_date: Some(run_date),
            status: VersionStatus::Done,
        }
    }

    /// Build a version discovered on disk.
    pub fn from_file(version_no: VersionNumber, file_name: impl Into<String>) -> Self {
        Self {
            version_no,
            file_name: file_name.into(),
            run_date: None,
            status: VersionStatus::New,
        }
    }

    /// True when the version has not been applied yet.
    pub fn is_new(&self) -> bool {
        self.status == VersionStatus::New
    }

    /// True when the version is recorded in the ledger.
    pub fn is_done(&self) -> bool {
        self.status == VersionStatus::Done
    }

    /// Canonical artifact file name, `<no>-<name>.version.<ext>`.
    ///
    /// The number is not zero padded, so this only matches on-disk names
    /// written without leading zeros. Use [`crate::ArtifactPattern`] to
    /// resolve padded names.
    pub fn artifact_file_name(&self, extension: &str) -> String {
        format!("{}-{}.version.{}", self.version_no, self.file_name, extension)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:03} {} ({})", self.version_no, self.file_name, self.status)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
