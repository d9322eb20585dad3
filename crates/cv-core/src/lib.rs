//! cv-core - Core library for confver
//!
//! This crate provides the shared [`Version`] record, the artifact file-name
//! pattern used to discover migrations on disk, and the project
//! configuration loaded from `confver.yml`.

pub mod artifact;
pub mod config;
pub mod error;
pub mod version;

pub use artifact::ArtifactPattern;
pub use config::{Config, DatabaseConfig, ExecutorKind};
pub use error::{CoreError, CoreResult};
pub use version::{Version, VersionNumber, VersionStatus};
