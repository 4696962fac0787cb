//! Installed-package manifest used to resolve plugin versions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use hostdesk_core::error::AppError;
use hostdesk_core::result::AppResult;

/// One installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Package name, e.g. `hostdesk/plugin-cpanel`.
    pub name: String,
    /// Installed version.
    pub version: String,
}

/// Lock-file style manifest: `{"packages": [{"name": .., "version": ..}]}`.
///
/// Other top-level keys of a real lock file are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Installed packages in file order.
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

impl PackageManifest {
    /// Builds a manifest from `(name, version)` pairs.
    pub fn new<I, N, V>(packages: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            packages: packages
                .into_iter()
                .map(|(name, version)| PackageEntry {
                    name: name.into(),
                    version: version.into(),
                })
                .collect(),
        }
    }

    /// Parses a manifest document.
    pub fn from_json(source: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses a manifest file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                hostdesk_core::error::ErrorKind::Configuration,
                format!("Cannot read package manifest '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&source)
    }

    /// Version of the first package named `name`.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.packages
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.version.as_str())
    }
}
