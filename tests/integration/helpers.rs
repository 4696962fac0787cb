//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::broadcast;

use hostdesk_core::config::AppConfig;
use hostdesk_core::events::{DomainEvent, EventPayload, ServiceEvent};
use hostdesk_entity::{Product, Server, ServiceRecord, ServiceStatus};
use hostdesk_plugin::api::{BroadcastNotifier, MemoryServiceStore, ServiceStore, StaticLocalizer};
use hostdesk_plugin::hooks::{HookDeclarations, MenuItem, ServiceDetail, UserMenu};
use hostdesk_plugin::{
    LifecycleController, Plugin, PluginInfo, PluginManager, PluginRegistry,
};
use plugin_manual::ManualPlugin;

/// An ordinary plugin that only answers hooks while enabled.
#[derive(Debug)]
pub struct TicketNotes;

impl Plugin for TicketNotes {
    fn info(&self) -> PluginInfo {
        PluginInfo::new("Ticket Notes")
            .slug("ticket-notes")
            .version("0.4.0")
    }

    fn hooks(&self, hooks: &mut HookDeclarations) {
        hooks
            .on::<UserMenu, _>(|_| vec![MenuItem::new("Notes", "/notes")])
            .on::<ServiceDetail, _>(|service| format!("<notes for {}>", service.username));
    }
}

/// Test application context
pub struct TestApp {
    /// Plugin manager under test
    pub manager: PluginManager,
    /// Service store backing the controller
    pub store: Arc<MemoryServiceStore>,
    /// Published domain events
    pub events: broadcast::Receiver<DomainEvent>,
}

impl TestApp {
    /// Create a test application from inline TOML configuration
    pub async fn new(config_toml: &str) -> Self {
        let config = AppConfig::from_toml(config_toml).expect("Failed to parse test config");

        let mut registry = PluginRegistry::from_config(&config.plugins);
        registry.register(Arc::new(ManualPlugin::new()));
        registry.register(Arc::new(TicketNotes));

        let store = Arc::new(MemoryServiceStore::new());
        let notifier = BroadcastNotifier::new(64);
        let events = notifier.subscribe();

        let controller = LifecycleController::new(
            store.clone(),
            Arc::new(notifier),
            Arc::new(StaticLocalizer::from_config(&config.lifecycle)),
        );

        Self {
            manager: PluginManager::new(registry, controller),
            store,
            events,
        }
    }

    /// Create a test application with default configuration
    pub async fn default_config() -> Self {
        Self::new("").await
    }

    /// Store a fresh service in `status` and return it
    pub async fn seed_service(&self, status: ServiceStatus) -> ServiceRecord {
        let service = ServiceRecord::new(manual_product().id, "alice", "s3cret")
            .with_domain("alice.example.com")
            .with_status(status);
        self.store
            .save(&service)
            .await
            .expect("Failed to seed service");
        service
    }

    /// Reload a service from the store
    pub async fn reload(&self, service: &ServiceRecord) -> ServiceRecord {
        self.store
            .find(service.id)
            .await
            .expect("Store error")
            .expect("Service disappeared")
    }

    /// Drain the service events published so far
    pub fn drain_events(&mut self) -> Vec<ServiceEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            let EventPayload::Service(event) = event.payload;
            drained.push(event);
        }
        drained
    }
}

/// A product provisioned by the manual backend
pub fn manual_product() -> Product {
    Product::new("Shared Hosting S", ManualPlugin::ID)
}

/// A server reachable by hostname
pub fn panel_server() -> Server {
    Server::new("web-1", "10.0.0.5").with_hostname("panel.example.com")
}
