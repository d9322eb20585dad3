//! Install command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the install command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let ledger = project.open_ledger()?;

    ledger
        .initialize_storage()
        .context("Failed to create ledger table")?;
    println!("Installed ledger for project: {}", project.config.name);
    Ok(())
}
