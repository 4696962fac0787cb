//! Plugin manager: the runtime facade over the frozen registry.

use std::sync::Arc;

use tracing::info;

use hostdesk_core::error::AppError;
use hostdesk_core::result::AppResult;
use hostdesk_entity::{Product, Server, ServiceRecord};

use crate::hooks::dispatcher::HookDispatcher;
use crate::registry::PluginRegistry;
use crate::server::{
    CommandPayload, CommandResult, LifecycleCommand, LifecycleController, ServerBinding,
    ServerPlugin,
};

/// Entry point for the host application once startup registration is done.
#[derive(Debug, Clone)]
pub struct PluginManager {
    /// Plugin registry.
    registry: Arc<PluginRegistry>,
    /// Hook dispatcher.
    dispatcher: HookDispatcher,
    /// Lifecycle controller.
    controller: LifecycleController,
}

impl PluginManager {
    /// Freezes `registry` and builds the dispatcher over it.
    pub fn new(registry: PluginRegistry, controller: LifecycleController) -> Self {
        let registry = Arc::new(registry);
        let dispatcher = HookDispatcher::new(registry.clone());

        info!(
            plugins = registry.len(),
            backends = registry.list_always_on().len(),
            hooks = registry.hooks().registered_hooks().len(),
            "Plugin manager ready"
        );

        Self {
            registry,
            dispatcher,
            controller,
        }
    }

    /// A fresh backend bound to the given records.
    ///
    /// The backend is the always-on plugin named by the product's
    /// `server_plugin`.
    pub fn backend_for(
        &self,
        product: &Product,
        service: Option<ServiceRecord>,
        server: Option<Server>,
    ) -> AppResult<Box<dyn ServerPlugin>> {
        let id = product.server_plugin.as_str();
        let mut backend = self.registry.backend(id).ok_or_else(|| {
            AppError::plugin(format!("'{id}' is not a registered provisioning backend"))
        })?;
        backend.bind(ServerBinding::new(Some(product.clone()), service, server));
        Ok(backend)
    }

    /// Runs `command` for `service` on the product's backend.
    pub async fn execute(
        &self,
        product: &Product,
        service: ServiceRecord,
        server: Option<Server>,
        command: &LifecycleCommand,
        payload: CommandPayload,
    ) -> AppResult<CommandResult> {
        let backend = self.backend_for(product, Some(service), server)?;
        self.controller
            .execute(backend.as_ref(), command, payload)
            .await
    }

    /// Returns the hook dispatcher for firing hooks.
    pub fn dispatcher(&self) -> &HookDispatcher {
        &self.dispatcher
    }

    /// Returns the lifecycle controller.
    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }
}
