//! Uninstall command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the uninstall command. Recorded runs are discarded.
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let ledger = project.open_ledger()?;

    ledger
        .teardown_storage()
        .context("Failed to drop ledger table")?;
    println!("Removed ledger for project: {}", project.config.name);
    Ok(())
}
