//! Plugin registry: plugin instances, their descriptors, and the hook table
//! built from the live ones.
//!
//! The registry is built once at startup with `&mut self` and then frozen
//! behind an `Arc`; everything after that is read-only.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use hostdesk_core::config::PluginConfig;

use crate::descriptor::{PluginDescriptor, PluginInfo, PluginKind};
use crate::enabled::EnabledSet;
use crate::hooks::registry::{HookDeclarations, HookTable};
use crate::manifest::PackageManifest;
use crate::server::ServerPlugin;

/// Trait that all plugins must implement.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns self-reported plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Gating kind. Provisioning backends override this with `AlwaysOn`.
    fn kind(&self) -> PluginKind {
        PluginKind::Ordinary
    }

    /// Fully-qualified name of the implementing type, used to derive an id
    /// when the info carries no slug.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Declares the hooks this plugin answers.
    fn hooks(&self, _hooks: &mut HookDeclarations) {}

    /// Creates a fresh, unbound provisioning backend.
    fn backend(&self) -> Option<Box<dyn ServerPlugin>> {
        None
    }
}

/// A registered plugin.
#[derive(Debug, Clone)]
struct RegisteredPlugin {
    /// Registry record.
    descriptor: PluginDescriptor,
    /// Plugin instance.
    instance: Arc<dyn Plugin>,
}

/// Registry of all plugins known to the process.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugins in registration order.
    plugins: Vec<RegisteredPlugin>,
    /// Plugin id → position in `plugins`.
    index: HashMap<String, usize>,
    /// Ids switched on by the operator.
    enabled: EnabledSet,
    /// Hooks of live plugins.
    hooks: HookTable,
}

impl PluginRegistry {
    /// Creates an empty registry gated by `enabled`.
    pub fn new(enabled: EnabledSet) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Creates an empty registry from the plugin configuration section.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(EnabledSet::from_json(&config.enabled))
    }

    /// Registers a plugin and returns its id.
    ///
    /// Registering an id again replaces its descriptor and instance in
    /// place. Hooks are indexed only when the plugin is always-on or its id
    /// is enabled.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> String {
        let kind = plugin.kind();
        let descriptor = PluginDescriptor::from_info(plugin.info(), plugin.type_name(), kind);
        let id = descriptor.id.clone();

        let live = kind == PluginKind::AlwaysOn || self.enabled.contains(&id);
        if live {
            let mut declarations = HookDeclarations::new();
            plugin.hooks(&mut declarations);
            for (hook, callable) in declarations.into_entries() {
                self.hooks.insert(hook, &id, callable);
            }
        } else {
            debug!(plugin_id = %id, "Plugin is not enabled, hooks not indexed");
        }

        info!(
            plugin_id = %id,
            name = %descriptor.name,
            kind = ?kind,
            live,
            "Registering plugin"
        );

        let entry = RegisteredPlugin {
            descriptor,
            instance: plugin,
        };

        match self.index.get(&id) {
            Some(&pos) => self.plugins[pos] = entry,
            None => {
                self.index.insert(id.clone(), self.plugins.len());
                self.plugins.push(entry);
            }
        }

        id
    }

    fn get(&self, id: &str) -> Option<&RegisteredPlugin> {
        self.index.get(id).map(|&pos| &self.plugins[pos])
    }

    /// Whether `id` is live: registered always-on, or in the enabled set.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.is_always_on(id) || self.enabled.contains(id)
    }

    /// Whether `id` is a registered always-on plugin.
    pub fn is_always_on(&self, id: &str) -> bool {
        self.get(id)
            .is_some_and(|plugin| plugin.descriptor.is_always_on())
    }

    /// All descriptors in registration order.
    pub fn list_all(&self) -> Vec<&PluginDescriptor> {
        self.plugins.iter().map(|p| &p.descriptor).collect()
    }

    /// Always-on descriptors in registration order.
    pub fn list_always_on(&self) -> Vec<&PluginDescriptor> {
        self.plugins
            .iter()
            .map(|p| &p.descriptor)
            .filter(|d| d.is_always_on())
            .collect()
    }

    /// Enabled ids as stored.
    pub fn enabled_ids(&self) -> &[String] {
        self.enabled.ids()
    }

    /// Looks up one descriptor.
    pub fn describe(&self, id: &str) -> Option<&PluginDescriptor> {
        self.get(id).map(|p| &p.descriptor)
    }

    /// Overwrites package-sourced versions with those found in `manifest`.
    ///
    /// Descriptors whose package is not listed keep their current version.
    pub fn resolve_versions(&mut self, manifest: &PackageManifest) {
        for plugin in &mut self.plugins {
            let Some(package) = plugin.descriptor.package() else {
                continue;
            };
            if let Some(version) = manifest.version_of(package) {
                debug!(
                    plugin_id = %plugin.descriptor.id,
                    package = %package,
                    version = %version,
                    "Resolved plugin version"
                );
                plugin.descriptor.set_resolved_version(version);
            }
        }
    }

    /// Hook table of live plugins.
    pub fn hooks(&self) -> &HookTable {
        &self.hooks
    }

    /// Creates a fresh backend for an always-on plugin.
    pub fn backend(&self, id: &str) -> Option<Box<dyn ServerPlugin>> {
        self.get(id)
            .filter(|p| p.descriptor.is_always_on())
            .and_then(|p| p.instance.backend())
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
