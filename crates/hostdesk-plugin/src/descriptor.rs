//! Plugin metadata: what a plugin says about itself and what the registry
//! records about it.

use serde::{Deserialize, Serialize};

/// How a plugin's hooks are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    /// Hooks are live only while the plugin id is in the enabled set.
    #[default]
    Ordinary,
    /// Live whenever registered. Provisioning backends are always-on.
    AlwaysOn,
}

/// Where a plugin's version comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    /// A version string declared by the plugin itself.
    Literal(String),
    /// An installed package whose version the package manifest knows.
    Package(String),
}

/// Self-reported plugin metadata, as returned by [`crate::Plugin::info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Stable identifier. When absent the id is derived from the type name.
    pub slug: Option<String>,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin description.
    pub description: String,
    /// Version declaration.
    pub version: VersionSource,
}

impl PluginInfo {
    /// Creates metadata with a literal `0.0.0` version and no slug.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            slug: None,
            name: name.into(),
            description: String::new(),
            version: VersionSource::Literal("0.0.0".to_string()),
        }
    }

    /// Sets the slug.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares a literal version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = VersionSource::Literal(version.into());
        self
    }

    /// Declares that the version comes from an installed package.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.version = VersionSource::Package(package.into());
        self
    }
}

/// Registry record for one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique id within a registry.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin description.
    pub description: String,
    /// Version declaration as reported by the plugin.
    pub version_source: VersionSource,
    /// Effective version. Package-sourced versions stay `None` until resolved.
    pub version: Option<String>,
    /// Gating kind.
    pub kind: PluginKind,
}

impl PluginDescriptor {
    /// Builds a descriptor from self-reported info.
    ///
    /// `type_name` is the implementing type's fully-qualified name and is
    /// only used when the info carries no (non-empty) slug.
    pub fn from_info(info: PluginInfo, type_name: &str, kind: PluginKind) -> Self {
        let id = match info.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => derive_id(type_name),
        };

        let version = match &info.version {
            VersionSource::Literal(version) => Some(version.clone()),
            VersionSource::Package(_) => None,
        };

        Self {
            id,
            name: info.name,
            description: info.description,
            version_source: info.version,
            version,
            kind,
        }
    }

    /// The package name this plugin's version is resolved from, if any.
    pub fn package(&self) -> Option<&str> {
        match &self.version_source {
            VersionSource::Package(name) => Some(name),
            VersionSource::Literal(_) => None,
        }
    }

    /// Whether this plugin is always-on.
    pub fn is_always_on(&self) -> bool {
        self.kind == PluginKind::AlwaysOn
    }

    pub(crate) fn set_resolved_version(&mut self, version: &str) {
        self.version = Some(version.to_string());
    }
}

/// Derives a plugin id from a fully-qualified type name.
///
/// `plugin_manual::plugin::ManualPlugin` becomes
/// `plugin_manual_plugin_manualplugin`.
pub fn derive_id(type_name: &str) -> String {
    type_name.replace("::", "_").to_lowercase()
}
