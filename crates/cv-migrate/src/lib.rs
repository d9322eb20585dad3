//! cv-migrate - Migration catalog and runner for confver
//!
//! [`VersionCatalog`] merges the artifacts found in the versions directory
//! with the rows already in the ledger. [`MigrationRunner`] applies the
//! pending subset in ascending order, recording each success and halting on
//! the first failure. How an artifact is actually run is delegated to a
//! [`MigrationExecutor`].

pub mod catalog;
pub mod error;
pub mod executor;
pub mod report;
pub mod runner;
pub mod template;

pub use catalog::{scan_directory, Catalog, DiscoveredArtifact, VersionCatalog};
pub use error::{ExecutionFailure, MigrateError, MigrateResult, VersionRunError};
pub use executor::{CommandExecutor, MigrationExecutor, SqlScriptExecutor};
pub use report::{Notice, NoticeLevel, RunReport};
pub use runner::MigrationRunner;
pub use template::TemplateEnvironment;
