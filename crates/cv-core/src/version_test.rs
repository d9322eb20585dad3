use super::*;
use chrono::TimeZone;

#[test]
fn test_default_is_undefined() {
    let v = Version::default();
    assert_eq!(v.status, VersionStatus::Undefined);
    assert!(!v.is_new());
    assert!(!v.is_done());
    assert!(v.run_date.is_none());
}

#[test]
fn test_from_ledger_is_done() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let v = Version::from_ledger(7, "add_users", at);
    assert_eq!(v.version_no, 7);
    assert_eq!(v.file_name, "add_users");
    assert_eq!(v.run_date, Some(at));
    assert!(v.is_done());
}

#[test]
fn test_from_file_is_new() {
    let v = Version::from_file(12, "seed");
    assert!(v.is_new());
    assert!(v.run_date.is_none());
}

#[test]
fn test_artifact_file_name_has_no_padding() {
    let v = Version::from_file(1, "init");
    assert_eq!(v.artifact_file_name("sql"), "1-init.version.sql");
}

#[test]
fn test_status_display_and_serde() {
    assert_eq!(VersionStatus::New.to_string(), "new");
    assert_eq!(VersionStatus::Done.to_string(), "done");
    assert_eq!(
        serde_json::to_string(&VersionStatus::Undefined).unwrap(),
        "\"undefined\""
    );
}

#[test]
fn test_new_version_serializes_without_run_date() {
    let json = serde_json::to_value(Version::from_file(3, "x")).unwrap();
    assert!(json.get("run_date").is_none());
    assert_eq!(json["status"], "new");
}

#[test]
fn test_display() {
    let v = Version::from_file(5, "addcol");
    assert_eq!(v.to_string(), "v005 addcol (new)");
}
