//! SQL artifact executor.

use super::MigrationExecutor;
use crate::error::ExecutionFailure;
use crate::template::{RenderFailure, TemplateEnvironment};
use duckdb::Connection;
use std::collections::HashMap;
use std::path::Path;

/// Renders an artifact with [`TemplateEnvironment`] and runs the result
/// as a single SQL batch inside one transaction.
///
/// Artifacts must not issue their own `BEGIN` / `COMMIT`.
pub struct SqlScriptExecutor {
    conn: Connection,
    templates: TemplateEnvironment<'static>,
}

impl SqlScriptExecutor {
    /// Create an executor targeting `conn`, with `vars` exposed to `var()`.
    pub fn new(conn: Connection, vars: &HashMap<String, serde_yaml::Value>) -> Self {
        Self {
            conn,
            templates: TemplateEnvironment::new(vars),
        }
    }

    /// Borrow the target connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Run `sql` between `BEGIN` and `COMMIT`, rolling back on error.
    fn execute_in_transaction(&self, sql: &str) -> Result<(), String> {
        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| format!("BEGIN failed: {e}"))?;

        if let Err(e) = self.conn.execute_batch(sql) {
            let _ = self.conn.execute_batch("ROLLBACK");
            return Err(e.to_string());
        }

        if let Err(e) = self.conn.execute_batch("COMMIT") {
            let _ = self.conn.execute_batch("ROLLBACK");
            return Err(format!("COMMIT failed: {e}"));
        }
        Ok(())
    }
}

impl MigrationExecutor for SqlScriptExecutor {
    fn execute(&self, path: &Path) -> Result<(), ExecutionFailure> {
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| ExecutionFailure::Read {
            path: display.clone(),
            source: e,
        })?;

        let rendered = self.templates.render(&source).map_err(|f| match f {
            RenderFailure::Signalled(message) => ExecutionFailure::Signalled {
                path: display.clone(),
                message,
            },
            RenderFailure::Template(message) => ExecutionFailure::Render {
                path: display.clone(),
                message,
            },
        })?;

        if rendered.trim().is_empty() {
            log::debug!("{display} rendered to no SQL; nothing to run");
            return Ok(());
        }

        self.execute_in_transaction(&rendered)
            .map_err(|message| ExecutionFailure::Sql {
                path: display,
                message,
            })
    }
}

#[cfg(test)]
#[path = "sql_test.rs"]
mod tests;
