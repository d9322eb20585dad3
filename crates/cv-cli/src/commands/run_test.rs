use super::*;
use crate::commands::install;
use cv_ledger::{Ledger, LedgerDb};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CONFIG: &str = r#"
name: run_test
database:
  path: target/run_test.duckdb
"#;

fn project(root: &Path, versions: &[(&str, &str)]) -> GlobalArgs {
    fs::write(root.join("confver.yml"), CONFIG).unwrap();
    fs::create_dir(root.join("versions")).unwrap();
    for (name, body) in versions {
        fs::write(root.join("versions").join(name), body).unwrap();
    }
    GlobalArgs {
        verbose: false,
        project_dir: root.to_path_buf(),
        config: None,
    }
}

fn recorded(root: &Path) -> Vec<u32> {
    let db = LedgerDb::open(&root.join("target/run_test.duckdb")).unwrap();
    db.fetch_all()
        .unwrap()
        .into_iter()
        .map(|r| r.version_no)
        .collect()
}

#[tokio::test]
async fn test_run_up_to_id() {
    let temp_dir = tempdir().unwrap();
    let global = project(
        temp_dir.path(),
        &[
            ("001-init.version.sql", "CREATE TABLE s (id INT);"),
            ("002-addcol.version.sql", "ALTER TABLE s ADD COLUMN v VARCHAR;"),
        ],
    );
    install::execute(&global).await.unwrap();

    execute(&RunArgs { id: 1 }, &global).await.unwrap();
    assert_eq!(recorded(temp_dir.path()), vec![1]);

    execute_all(&global).await.unwrap();
    assert_eq!(recorded(temp_dir.path()), vec![1, 2]);
}

#[tokio::test]
async fn test_failed_migration_still_exits_ok() {
    let temp_dir = tempdir().unwrap();
    let global = project(
        temp_dir.path(),
        &[
            ("001-ok.version.sql", "CREATE TABLE s (id INT);"),
            ("002-bad.version.sql", "INSERT INTO nowhere VALUES (1);"),
            ("003-later.version.sql", "CREATE TABLE t (id INT);"),
        ],
    );
    install::execute(&global).await.unwrap();

    execute_all(&global).await.unwrap();
    assert_eq!(recorded(temp_dir.path()), vec![1]);
}

#[tokio::test]
async fn test_run_without_install_is_error() {
    let temp_dir = tempdir().unwrap();
    let global = project(temp_dir.path(), &[("001-ok.version.sql", "SELECT 1;")]);
    assert!(execute_all(&global).await.is_err());
}

#[tokio::test]
async fn test_missing_versions_dir_is_error() {
    let temp_dir = tempdir().unwrap();
    let global = project(temp_dir.path(), &[]);
    fs::remove_dir(temp_dir.path().join("versions")).unwrap();
    install::execute(&global).await.unwrap();
    assert!(execute_all(&global).await.is_err());
}

#[tokio::test]
async fn test_uninstall_discards_history() {
    let temp_dir = tempdir().unwrap();
    let global = project(temp_dir.path(), &[("001-ok.version.sql", "SELECT 1;")]);
    install::execute(&global).await.unwrap();
    execute_all(&global).await.unwrap();
    assert_eq!(recorded(temp_dir.path()), vec![1]);

    crate::commands::uninstall::execute(&global).await.unwrap();
    install::execute(&global).await.unwrap();
    assert!(recorded(temp_dir.path()).is_empty());
}
