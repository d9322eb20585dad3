//! DDL for the ledger table.

/// Name of the ledger table.
pub const TABLE_NAME: &str = "system_config_versions";

/// Longest file name the ledger stores.
pub const MAX_FILE_NAME_LEN: usize = 250;

/// Create the ledger table and its id sequence. Idempotent.
pub const CREATE_LEDGER: &str = "
CREATE SEQUENCE IF NOT EXISTS system_config_versions_id_seq START 1;
CREATE TABLE IF NOT EXISTS system_config_versions (
    id          UINTEGER     DEFAULT nextval('system_config_versions_id_seq') PRIMARY KEY,
    version_no  UINTEGER     NOT NULL DEFAULT 0 UNIQUE,
    run_date    TIMESTAMP    NOT NULL DEFAULT current_timestamp,
    filename    VARCHAR(250) NOT NULL DEFAULT ''
);
";

/// Drop the ledger table and its sequence, discarding all rows.
pub const DROP_LEDGER: &str = "
DROP TABLE IF EXISTS system_config_versions;
DROP SEQUENCE IF EXISTS system_config_versions_id_seq;
";
