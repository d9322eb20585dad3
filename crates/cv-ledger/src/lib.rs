//! Execution ledger for confver.
//!
//! Provides a DuckDB-backed `system_config_versions` table recording which
//! migration versions have run and when. Rows are append-only: the only
//! write path is [`Ledger::record`], and storage enforces one row per
//! version number.

pub mod connection;
pub mod ddl;
pub mod error;
pub mod ledger;

pub use connection::LedgerDb;
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerRow};
