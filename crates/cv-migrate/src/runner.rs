//! Migration runner: apply pending versions in order, halt on first failure.
//!
//! Each version commits independently. A batch that fails at version 5 of
//! 10 leaves 1-4 recorded and 5-10 pending. There is no lock against a
//! concurrent run; the ledger's unique version number is the only guard,
//! and a second insert for the same version fails that run.

use crate::catalog::{scan_directory, Catalog};
use crate::error::{ExecutionFailure, VersionRunError};
use crate::executor::MigrationExecutor;
use crate::report::{Notice, RunReport};
use cv_core::{ArtifactPattern, Version, VersionNumber};
use cv_ledger::Ledger;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Executes versions against a ledger through a [`MigrationExecutor`].
pub struct MigrationRunner<'a> {
    ledger: &'a dyn Ledger,
    executor: &'a dyn MigrationExecutor,
    versions_dir: PathBuf,
    pattern: ArtifactPattern,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(
        ledger: &'a dyn Ledger,
        executor: &'a dyn MigrationExecutor,
        versions_dir: impl Into<PathBuf>,
        pattern: ArtifactPattern,
    ) -> Self {
        Self {
            ledger,
            executor,
            versions_dir: versions_dir.into(),
            pattern,
        }
    }

    /// Run every NEW version in `catalog`.
    pub fn run_all(&self, catalog: &Catalog) -> RunReport {
        self.run_versions(&catalog.pending())
    }

    /// Run every NEW version in `catalog` numbered `<= up_to`.
    pub fn run_up_to(&self, catalog: &Catalog, up_to: VersionNumber) -> RunReport {
        self.run_versions(&catalog.pending_up_to(up_to))
    }

    /// Run the NEW entries of `subset` in ascending order.
    ///
    /// Entries that are not NEW are dropped. The first failure emits an
    /// error notice and stops the batch.
    pub fn run_versions(&self, subset: &[Version]) -> RunReport {
        let mut pending: Vec<&Version> = subset.iter().filter(|v| v.is_new()).collect();
        pending.sort_by_key(|v| v.version_no);

        let mut report = RunReport::default();
        let mut queue = pending.into_iter();

        while let Some(version) = queue.next() {
            let version_no = version.version_no;
            match self.try_run_version(version) {
                Ok(()) => {
                    let msg = format!("Version {version_no} ({}) applied", version.file_name);
                    log::info!("{msg}");
                    report.notices.push(Notice::info(version_no, msg));
                    report.applied.push(version_no);
                }
                Err(e) => {
                    let msg = format!("Version {version_no} ({}) failed: {e}", version.file_name);
                    log::error!("{msg}");
                    report.notices.push(Notice::error(version_no, msg));
                    report.failed = Some(version_no);
                    report.skipped = queue.by_ref().map(|v| v.version_no).collect();
                    if !report.skipped.is_empty() {
                        log::warn!(
                            "Halted after version {version_no}; {} pending version(s) not run",
                            report.skipped.len()
                        );
                    }
                    break;
                }
            }
        }
        report
    }

    /// Run one version. True only if it executed and was recorded.
    pub fn run_version(&self, version: &Version) -> bool {
        match self.try_run_version(version) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Version {} failed: {e}", version.version_no);
                false
            }
        }
    }

    /// Run one version, reporting why it did not apply.
    ///
    /// Never panics because of the executor: a panic inside the artifact
    /// run becomes [`ExecutionFailure::Panicked`].
    pub fn try_run_version(&self, version: &Version) -> Result<(), VersionRunError> {
        if !version.is_new() {
            return Err(VersionRunError::NotPending(version.version_no));
        }

        let path = self.resolve_artifact(version)?;
        log::debug!("Running version {} from {}", version.version_no, path.display());

        self.execute_isolated(&path)?;

        self.ledger
            .record(version.version_no, &version.file_name)
            .map_err(|source| VersionRunError::Record {
                version_no: version.version_no,
                source,
            })
    }

    /// Find the artifact backing `version`.
    ///
    /// Matches on the parsed number and name rather than rebuilding the file
    /// name, so zero-padded prefixes resolve.
    pub fn resolve_artifact(&self, version: &Version) -> Result<PathBuf, VersionRunError> {
        scan_directory(&self.versions_dir, &self.pattern)?
            .into_iter()
            .find(|a| a.version_no == version.version_no && a.file_name == version.file_name)
            .map(|a| a.path)
            .ok_or_else(|| {
                ExecutionFailure::ArtifactMissing {
                    version_no: version.version_no,
                    file_name: version.file_name.clone(),
                    dir: self.versions_dir.display().to_string(),
                }
                .into()
            })
    }

    fn execute_isolated(&self, path: &Path) -> Result<(), ExecutionFailure> {
        panic::catch_unwind(AssertUnwindSafe(|| self.executor.execute(path))).unwrap_or_else(
            |payload| {
                Err(ExecutionFailure::Panicked {
                    path: path.display().to_string(),
                    message: panic_message(payload.as_ref()),
                })
            },
        )
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
