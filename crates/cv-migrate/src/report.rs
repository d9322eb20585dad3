//! Notices and the summary of a batch run.

use cv_core::VersionNumber;
use serde::Serialize;
use std::fmt;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A user-facing message about one version's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub version_no: VersionNumber,
    pub message: String,
}

impl Notice {
    pub(crate) fn info(version_no: VersionNumber, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            version_no,
            message: message.into(),
        }
    }

    pub(crate) fn error(version_no: VersionNumber, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            version_no,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Outcome of [`crate::MigrationRunner::run_versions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Notices in emission order
    pub notices: Vec<Notice>,
    /// Versions applied and recorded, in run order
    pub applied: Vec<VersionNumber>,
    /// The version that halted the batch, if any
    pub failed: Option<VersionNumber>,
    /// Pending versions left unrun because of the failure
    pub skipped: Vec<VersionNumber>,
}

impl RunReport {
    /// True when no version failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }

    /// Number of versions executed, including the failing one.
    pub fn attempted(&self) -> usize {
        self.applied.len() + usize::from(self.failed.is_some())
    }
}
