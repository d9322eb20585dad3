//! Artifact file-name pattern: `<3-5 digits>-<name>.version.<ext>`.

use crate::error::{CoreError, CoreResult};
use crate::version::VersionNumber;
use regex::Regex;

/// Compiled matcher for migration artifact file names.
///
/// The name part may contain any character except `.`. Prefixes shorter
/// than three or longer than five digits are rejected.
#[derive(Debug, Clone)]
pub struct ArtifactPattern {
    regex: Regex,
    extension: String,
}

impl ArtifactPattern {
    /// Build a pattern for artifacts ending in `.version.<extension>`.
    pub fn new(extension: &str) -> CoreResult<Self> {
        let source = format!(
            r"^(\d{{3,5}})-([^.]+)\.version\.{}$",
            regex::escape(extension)
        );
        let regex = Regex::new(&source).map_err(|e| CoreError::InvalidPattern {
            extension: extension.to_string(),
            source: e,
        })?;
        Ok(Self {
            regex,
            extension: extension.to_string(),
        })
    }

    /// The configured artifact extension (without the `.version.` infix).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Split a file name into its version number and logical name.
    ///
    /// Returns `None` for anything that does not match the pattern.
    pub fn parse(&self, file_name: &str) -> Option<(VersionNumber, String)> {
        let caps = self.regex.captures(file_name)?;
        // At most five digits, always fits.
        let number = caps.get(1)?.as_str().parse::<VersionNumber>().ok()?;
        let name = caps.get(2)?.as_str().to_string();
        Some((number, name))
    }

    /// True when `file_name` names an artifact of this pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
