//! Configuration types and parsing for confver.yml

use crate::artifact::ArtifactPattern;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main project configuration from confver.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory containing migration artifacts, relative to the project root
    #[serde(default = "default_versions_path")]
    pub versions_path: String,

    /// Artifact suffix after `.version.`
    #[serde(default = "default_extension")]
    pub extension: String,

    /// How artifacts are executed
    #[serde(default)]
    pub executor: ExecutorKind,

    /// Program and leading arguments used by the `command` executor
    #[serde(default = "default_interpreter")]
    pub interpreter: Vec<String>,

    /// Database holding the ledger (and targeted by SQL artifacts)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Variables available to SQL artifacts via `var()`
    #[serde(default)]
    pub vars: HashMap<String, serde_yaml::Value>,
}

/// Artifact executor selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// Render as a Jinja template and run as a SQL batch (default)
    #[default]
    Sql,
    /// Run as an external program
    Command,
}

impl std::fmt::Display for ExecutorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorKind::Sql => write!(f, "sql"),
            ExecutorKind::Command => write!(f, "command"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, relative to the project root, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_versions_path() -> String {
    "versions".to_string()
}

fn default_extension() -> String {
    "sql".to_string()
}

fn default_interpreter() -> Vec<String> {
    vec!["sh".to_string()]
}

fn default_db_path() -> String {
    "target/confver.duckdb".to_string()
}

/// In-memory DuckDB marker accepted in `database.path`
pub const MEMORY_DB: &str = ":memory:";

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for confver.yml or confver.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("confver.yml");
        let yaml_path = dir.join("confver.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.versions_path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "versions_path cannot be empty".to_string(),
            });
        }

        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "extension '{}' must be non-empty and must not contain '.'",
                    self.extension
                ),
            });
        }

        if self.executor == ExecutorKind::Command && self.interpreter.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "interpreter must name a program when executor is 'command'"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Absolute path of the versions directory
    pub fn versions_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.versions_path)
    }

    /// Database path resolved against `root`, or `None` for an in-memory database
    pub fn database_path(&self, root: &Path) -> Option<PathBuf> {
        if self.database.path == MEMORY_DB {
            None
        } else {
            Some(root.join(&self.database.path))
        }
    }

    /// Compile the artifact pattern for the configured extension
    pub fn artifact_pattern(&self) -> CoreResult<ArtifactPattern> {
        ArtifactPattern::new(&self.extension)
    }

    /// Get a variable value
    pub fn get_var(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.vars.get(name)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
