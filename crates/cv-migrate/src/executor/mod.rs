//! Pluggable artifact execution.
//!
//! The runner only knows that an artifact either succeeded or failed. How
//! it is authored and run is up to the [`MigrationExecutor`]:
//!
//! - [`SqlScriptExecutor`] — render as a Jinja template, run as one SQL batch
//! - [`CommandExecutor`] — run as an external program

mod command;
mod sql;

pub use command::CommandExecutor;
pub use sql::SqlScriptExecutor;

use crate::error::ExecutionFailure;
use std::path::Path;

/// Runs one migration artifact.
pub trait MigrationExecutor {
    /// Execute the artifact at `path` with no arguments.
    ///
    /// Returning `Ok` means the migration applied and may be recorded.
    fn execute(&self, path: &Path) -> Result<(), ExecutionFailure>;
}

impl<E: MigrationExecutor + ?Sized> MigrationExecutor for Box<E> {
    fn execute(&self, path: &Path) -> Result<(), ExecutionFailure> {
        (**self).execute(path)
    }
}
