//! Version catalog: the ledger merged with the versions directory.
//!
//! The ledger is read first. Each artifact on disk whose number is not
//! already present is then added as NEW, so a ledger hit is never replaced
//! by a file and an applied version is never offered for re-execution.

use crate::error::{MigrateError, MigrateResult};
use cv_core::{ArtifactPattern, Version, VersionNumber};
use cv_ledger::Ledger;
use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

/// One artifact file found in the versions directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredArtifact {
    pub version_no: VersionNumber,
    pub file_name: String,
    pub path: PathBuf,
}

/// List artifacts in `dir` (non-recursive), in file-name order.
///
/// Entries that are not regular files, are not valid UTF-8, or do not match
/// `pattern` are skipped. Several files may share a version number; callers
/// decide which one wins.
pub fn scan_directory(
    dir: &Path,
    pattern: &ArtifactPattern,
) -> MigrateResult<Vec<DiscoveredArtifact>> {
    let scan_err = |e: std::io::Error| MigrateError::Scan {
        path: dir.display().to_string(),
        source: e,
    };

    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let entry = entry.map_err(scan_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            entries.push((name.to_string(), path));
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries
        .into_iter()
        .filter_map(|(name, path)| match pattern.parse(&name) {
            Some((version_no, file_name)) => Some(DiscoveredArtifact {
                version_no,
                file_name,
                path,
            }),
            None => {
                log::debug!("Ignoring {name}: not a version artifact");
                None
            }
        })
        .collect())
}

/// Merged, deduplicated view of all known versions, ascending by number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    versions: BTreeMap<VersionNumber, Version>,
}

impl Catalog {
    /// Look up a version by number.
    pub fn get(&self, version_no: VersionNumber) -> Option<&Version> {
        self.versions.get(&version_no)
    }

    /// Iterate in ascending version order.
    pub fn iter(&self) -> btree_map::Values<'_, VersionNumber, Version> {
        self.versions.values()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// True when at least one version is NEW.
    pub fn has_pending(&self) -> bool {
        self.iter().any(Version::is_new)
    }

    /// All NEW versions, ascending.
    pub fn pending(&self) -> Vec<Version> {
        self.iter().filter(|v| v.is_new()).cloned().collect()
    }

    /// NEW versions numbered `<= up_to`, ascending.
    pub fn pending_up_to(&self, up_to: VersionNumber) -> Vec<Version> {
        self.versions
            .range(..=up_to)
            .map(|(_, v)| v)
            .filter(|v| v.is_new())
            .cloned()
            .collect()
    }

    /// Consume the catalog into an ascending list.
    pub fn into_versions(self) -> Vec<Version> {
        self.versions.into_values().collect()
    }

    /// Insert unless the number is already taken. Returns whether it was added.
    fn insert_if_absent(&mut self, version: Version) -> bool {
        match self.versions.entry(version.version_no) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(version);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Version;
    type IntoIter = btree_map::Values<'a, VersionNumber, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a [`Catalog`] from a ledger and a versions directory.
pub struct VersionCatalog<'a> {
    ledger: &'a dyn Ledger,
    versions_dir: PathBuf,
    pattern: ArtifactPattern,
}

impl<'a> VersionCatalog<'a> {
    pub fn new(
        ledger: &'a dyn Ledger,
        versions_dir: impl Into<PathBuf>,
        pattern: ArtifactPattern,
    ) -> Self {
        Self {
            ledger,
            versions_dir: versions_dir.into(),
            pattern,
        }
    }

    /// Merge the ledger with the versions directory.
    ///
    /// Fails as a whole if either source cannot be read.
    pub fn build(&self) -> MigrateResult<Catalog> {
        let mut catalog = Catalog::default();

        for row in self.ledger.fetch_all()? {
            catalog.insert_if_absent(Version::from(row));
        }
        let recorded = catalog.len();

        for artifact in scan_directory(&self.versions_dir, &self.pattern)? {
            let path = artifact.path.display().to_string();
            let version_no = artifact.version_no;
            if !catalog.insert_if_absent(Version::from_file(version_no, artifact.file_name)) {
                log::debug!("Skipping {path}: version {version_no} already catalogued");
            }
        }

        log::debug!(
            "Catalog built: {} versions ({} recorded, {} new)",
            catalog.len(),
            recorded,
            catalog.len() - recorded
        );
        Ok(catalog)
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
