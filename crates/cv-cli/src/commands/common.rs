//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use cv_core::{ArtifactPattern, Config, ExecutorKind};
use cv_ledger::LedgerDb;
use cv_migrate::{
    Catalog, CommandExecutor, MigrationExecutor, NoticeLevel, RunReport, SqlScriptExecutor,
    VersionCatalog,
};
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// A loaded project: its root directory and configuration.
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    /// Absolute versions directory
    pub(crate) fn versions_dir(&self) -> PathBuf {
        self.config.versions_dir(&self.root)
    }

    /// Compiled artifact file-name pattern
    pub(crate) fn pattern(&self) -> Result<ArtifactPattern> {
        self.config
            .artifact_pattern()
            .context("Invalid artifact extension")
    }

    /// Open the ledger database, creating its parent directory if needed.
    pub(crate) fn open_ledger(&self) -> Result<LedgerDb> {
        match self.config.database_path(&self.root) {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
                LedgerDb::open(&path).context("Failed to open ledger database")
            }
            None => LedgerDb::open_memory().context("Failed to open in-memory database"),
        }
    }

    /// Merge the ledger with the versions directory.
    pub(crate) fn build_catalog(&self, ledger: &LedgerDb) -> Result<Catalog> {
        VersionCatalog::new(ledger, self.versions_dir(), self.pattern()?)
            .build()
            .context("Failed to build version catalog")
    }

    /// Build the configured artifact executor.
    pub(crate) fn executor(&self, ledger: &LedgerDb) -> Result<Box<dyn MigrationExecutor>> {
        match self.config.executor {
            ExecutorKind::Sql => {
                let conn = ledger
                    .try_clone_connection()
                    .context("Failed to open connection for SQL artifacts")?;
                Ok(Box::new(SqlScriptExecutor::new(conn, &self.config.vars)))
            }
            ExecutorKind::Command => CommandExecutor::new(&self.config.interpreter)
                .map(|e| Box::new(e) as Box<dyn MigrationExecutor>)
                .context("No interpreter configured for the command executor"),
        }
    }
}

/// Load the project from `--config` or the project directory.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();
    let config = match &global.config {
        Some(path) => Config::load(path).context("Failed to load configuration file")?,
        None => Config::load_from_dir(&root).context("Failed to load project configuration")?,
    };
    log::debug!(
        "Project '{}' at {} ({} executor)",
        config.name,
        root.display(),
        config.executor
    );
    Ok(Project { root, config })
}

/// Print the notices of a run followed by a one-line summary.
pub(crate) fn print_report(report: &RunReport) {
    for notice in &report.notices {
        match notice.level {
            NoticeLevel::Info => println!("  {}", notice.message),
            NoticeLevel::Error => eprintln!("  {}", notice.message),
        }
    }

    println!();
    match report.failed {
        None => println!(
            "Applied {} version{}",
            report.applied.len(),
            if report.applied.len() == 1 { "" } else { "s" }
        ),
        Some(failed) => println!(
            "Applied {}, failed at version {}, {} not run",
            report.applied.len(),
            failed,
            report.skipped.len()
        ),
    }
}
