//! Manual plugin: registers the backend and its hooks.

use hostdesk_plugin::prelude::*;

use crate::backend::ManualBackend;
use crate::hooks;

/// Always-on plugin providing [`ManualBackend`].
#[derive(Debug, Clone, Default)]
pub struct ManualPlugin;

impl ManualPlugin {
    /// Plugin id.
    pub const ID: &'static str = "manual";

    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ManualPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            slug: Self::ID,
            name: "Manual",
            description: "Lifecycle actions are carried out by an operator",
            package: "hostdesk/plugin-manual"
        )
    }

    fn kind(&self) -> PluginKind {
        PluginKind::AlwaysOn
    }

    fn hooks(&self, declarations: &mut HookDeclarations) {
        declarations
            .on::<AdminMenu, _>(|_| hooks::admin_menu())
            .on::<ServiceDetail, _>(hooks::service_detail);
    }

    fn backend(&self) -> Option<Box<dyn ServerPlugin>> {
        Some(Box::new(ManualBackend::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hostdesk_plugin::{EnabledSet, PackageManifest, PluginRegistry};

    use super::*;

    #[test]
    fn test_registers_as_always_on_backend() {
        let mut registry = PluginRegistry::new(EnabledSet::new());
        let id = registry.register(Arc::new(ManualPlugin::new()));

        assert_eq!(id, ManualPlugin::ID);
        assert!(registry.is_always_on(ManualPlugin::ID));
        assert!(registry.backend(ManualPlugin::ID).is_some());
        assert_eq!(
            registry.hooks().registered_hooks(),
            ["admin_menu", "service_detail"]
        );
    }

    #[test]
    fn test_version_comes_from_manifest() {
        let mut registry = PluginRegistry::new(EnabledSet::new());
        registry.register(Arc::new(ManualPlugin::new()));
        registry.resolve_versions(&PackageManifest::new([("hostdesk/plugin-manual", "1.4.2")]));

        let descriptor = registry.describe(ManualPlugin::ID).unwrap();
        assert_eq!(descriptor.version.as_deref(), Some("1.4.2"));
    }
}
