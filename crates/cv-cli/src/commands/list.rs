//! List command implementation

use anyhow::{Context, Result};
use cv_core::Version;

use crate::cli::{GlobalArgs, ListArgs, ListOutput};
use crate::commands::common::load_project;

/// Execute the list command
pub async fn execute(args: &ListArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let ledger = project.open_ledger()?;
    let catalog = project.build_catalog(&ledger)?;
    let versions: Vec<&Version> = catalog.iter().collect();

    match args.output {
        ListOutput::Table => {
            print_table(&versions);
            if catalog.has_pending() {
                println!("Run `cv run-all` to apply pending versions, or `cv run --id N` to stop at N");
            }
        }
        ListOutput::Json => print_json(&versions)?,
    }
    Ok(())
}

/// Render the status table rows, header first.
pub(crate) fn table_lines(versions: &[&Version]) -> Vec<String> {
    let file_width = versions
        .iter()
        .map(|v| v.file_name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let no_width = 7;
    let date_width = 19;

    let mut lines = vec![
        format!(
            "{:<no_width$}  {:<file_width$}  {:<date_width$}  STATUS",
            "VERSION", "FILE", "RUN_DATE"
        ),
        format!(
            "{:-<no_width$}  {:-<file_width$}  {:-<date_width$}  {}",
            "",
            "",
            "",
            "-".repeat(6)
        ),
    ];

    for v in versions {
        let run_date = v
            .run_date
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<no_width$}  {:<file_width$}  {:<date_width$}  {}",
            v.version_no, v.file_name, run_date, v.status
        ));
    }
    lines
}

fn print_table(versions: &[&Version]) {
    for line in table_lines(versions) {
        println!("{line}");
    }

    let pending = versions.iter().filter(|v| v.is_new()).count();
    println!();
    println!(
        "{} versions, {} applied, {} pending",
        versions.len(),
        versions.len() - pending,
        pending
    );
}

fn print_json(versions: &[&Version]) -> Result<()> {
    let json = serde_json::to_string_pretty(versions).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "list_test.rs"]
mod tests;
