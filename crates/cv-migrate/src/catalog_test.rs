use super::*;
use cv_core::VersionStatus;
use cv_ledger::{LedgerDb, LedgerError, LedgerResult, LedgerRow};
use std::fs;
use tempfile::TempDir;

// ── Helpers ────────────────────────────────────────────────────────────

fn ledger() -> LedgerDb {
    let db = LedgerDb::open_memory().unwrap();
    db.initialize_storage().unwrap();
    db
}

fn versions_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for f in files {
        fs::write(dir.path().join(f), "SELECT 1;").unwrap();
    }
    dir
}

fn sql() -> ArtifactPattern {
    ArtifactPattern::new("sql").unwrap()
}

struct BrokenLedger;

impl Ledger for BrokenLedger {
    fn fetch_all(&self) -> LedgerResult<Vec<LedgerRow>> {
        Err(LedgerError::QueryError("connection reset".to_string()))
    }

    fn record(&self, _: VersionNumber, _: &str) -> LedgerResult<()> {
        Err(LedgerError::InsertError("connection reset".to_string()))
    }
}

// ── scan_directory ─────────────────────────────────────────────────────

#[test]
fn scan_ignores_non_matching_files() {
    let dir = versions_dir(&[
        "001-init.version.sql",
        "12-bad.version.sql",
        "README.md",
        "002-a.b.version.sql",
        "003-other.version.php",
    ]);
    let found = scan_directory(dir.path(), &sql()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].version_no, 1);
    assert_eq!(found[0].file_name, "init");
    assert_eq!(found[0].path, dir.path().join("001-init.version.sql"));
}

#[test]
fn scan_is_not_recursive() {
    let dir = versions_dir(&["001-init.version.sql"]);
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("002-deep.version.sql"), "").unwrap();
    fs::create_dir(dir.path().join("003-dir.version.sql")).unwrap();

    let found = scan_directory(dir.path(), &sql()).unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn scan_missing_directory_is_scan_error() {
    let dir = TempDir::new().unwrap();
    let err = scan_directory(&dir.path().join("nope"), &sql()).unwrap_err();
    assert!(matches!(err, MigrateError::Scan { .. }));
    assert!(err.to_string().starts_with("[V001]"));
}

// ── VersionCatalog::build ──────────────────────────────────────────────

#[test]
fn build_empty() {
    let db = ledger();
    let dir = versions_dir(&[]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();
    assert!(catalog.is_empty());
    assert!(!catalog.has_pending());
}

#[test]
fn build_marks_disk_only_versions_new() {
    let db = ledger();
    let dir = versions_dir(&["001-init.version.sql", "002-addcol.version.sql"]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();

    assert_eq!(catalog.len(), 2);
    for v in &catalog {
        assert_eq!(v.status, VersionStatus::New);
        assert!(v.run_date.is_none());
    }
    assert_eq!(catalog.get(2).unwrap().file_name, "addcol");
}

#[test]
fn ledger_takes_precedence_over_disk() {
    let db = ledger();
    db.record(1, "init").unwrap();
    let dir = versions_dir(&["001-renamed.version.sql", "002-addcol.version.sql"]);

    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();
    let first = catalog.get(1).unwrap();
    assert_eq!(first.status, VersionStatus::Done);
    assert_eq!(first.file_name, "init");
    assert!(first.run_date.is_some());
    assert_eq!(catalog.get(2).unwrap().status, VersionStatus::New);
}

#[test]
fn ledger_rows_without_files_are_kept() {
    let db = ledger();
    db.record(5, "removed_file").unwrap();
    let dir = versions_dir(&[]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();
    assert!(catalog.get(5).unwrap().is_done());
}

#[test]
fn iteration_is_ascending_without_duplicates() {
    let db = ledger();
    db.record(40, "forty").unwrap();
    db.record(7, "seven").unwrap();
    let dir = versions_dir(&[
        "30000-big.version.sql",
        "0100-hundred.version.sql",
        "007-dup_of_ledger.version.sql",
        "020-twenty.version.sql",
    ]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();
    let numbers: Vec<VersionNumber> = catalog.iter().map(|v| v.version_no).collect();
    assert_eq!(numbers, vec![7, 20, 40, 100, 30000]);
}

#[test]
fn duplicate_disk_numbers_first_wins() {
    let db = ledger();
    let dir = versions_dir(&["0003-beta.version.sql", "003-alpha.version.sql"]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();
    assert_eq!(catalog.len(), 1);
    // "0003-..." sorts before "003-..."
    assert_eq!(catalog.get(3).unwrap().file_name, "beta");
}

#[test]
fn undefined_status_never_escapes() {
    let db = ledger();
    db.record(1, "a").unwrap();
    let dir = versions_dir(&["002-b.version.sql"]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();
    assert!(catalog.iter().all(|v| v.status != VersionStatus::Undefined));
}

#[test]
fn storage_error_aborts_build() {
    let dir = versions_dir(&["001-init.version.sql"]);
    let err = VersionCatalog::new(&BrokenLedger, dir.path(), sql())
        .build()
        .unwrap_err();
    assert!(matches!(err, MigrateError::Storage(_)));
}

#[test]
fn scan_error_aborts_build() {
    let db = ledger();
    db.record(1, "init").unwrap();
    let dir = TempDir::new().unwrap();
    let result = VersionCatalog::new(&db, dir.path().join("missing"), sql()).build();
    assert!(matches!(result, Err(MigrateError::Scan { .. })));
}

#[test]
fn uninstalled_ledger_is_storage_error() {
    let db = LedgerDb::open_memory().unwrap();
    let dir = versions_dir(&[]);
    let err = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap_err();
    assert!(matches!(
        err,
        MigrateError::Storage(LedgerError::NotInstalled(_))
    ));
}

// ── Catalog filters ────────────────────────────────────────────────────

#[test]
fn pending_filters() {
    let db = ledger();
    db.record(2, "two").unwrap();
    let dir = versions_dir(&[
        "001-one.version.sql",
        "002-two.version.sql",
        "003-three.version.sql",
        "004-four.version.sql",
    ]);
    let catalog = VersionCatalog::new(&db, dir.path(), sql()).build().unwrap();

    let all: Vec<VersionNumber> = catalog.pending().iter().map(|v| v.version_no).collect();
    assert_eq!(all, vec![1, 3, 4]);

    let upto: Vec<VersionNumber> = catalog
        .pending_up_to(3)
        .iter()
        .map(|v| v.version_no)
        .collect();
    assert_eq!(upto, vec![1, 3]);
    assert!(catalog.pending_up_to(0).is_empty());
    assert!(catalog.has_pending());
}
