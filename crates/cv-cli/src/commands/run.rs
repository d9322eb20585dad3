//! Run and run-all command implementations
//!
//! Migration failures are reported as error notices, not as a failing exit
//! status. Only configuration, scan, and storage problems abort the command.

use anyhow::Result;
use cv_migrate::MigrationRunner;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{load_project, print_report};

/// Execute the run command: pending versions up to and including `--id`
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    run_pending(global, Some(args.id))
}

/// Execute the run-all command
pub async fn execute_all(global: &GlobalArgs) -> Result<()> {
    run_pending(global, None)
}

fn run_pending(global: &GlobalArgs, up_to: Option<u32>) -> Result<()> {
    let project = load_project(global)?;
    let ledger = project.open_ledger()?;
    let catalog = project.build_catalog(&ledger)?;
    let executor = project.executor(&ledger)?;
    let runner = MigrationRunner::new(
        &ledger,
        executor.as_ref(),
        project.versions_dir(),
        project.pattern()?,
    );

    let report = match up_to {
        Some(id) => runner.run_up_to(&catalog, id),
        None => runner.run_all(&catalog),
    };

    if report.attempted() == 0 {
        match up_to {
            Some(id) => println!("No pending versions up to {id}"),
            None => println!("No pending versions"),
        }
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
