//! HostDesk Server: plugin host for hosting provisioning.
//!
//! Main entry point. Builds the plugin registry and hands it to the plugin
//! manager.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use hostdesk_core::config::AppConfig;
use hostdesk_core::error::AppError;
use hostdesk_plugin::api::{BroadcastNotifier, MemoryServiceStore, StaticLocalizer};
use hostdesk_plugin::hooks::AdminMenu;
use hostdesk_plugin::{LifecycleController, PackageManifest, PluginManager, PluginRegistry};
use plugin_manual::ManualPlugin;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("HOSTDESK_CONFIG").unwrap_or_else(|_| "config/default".to_string());

    AppConfig::load(&config_path)
        .map_err(|e| AppError::configuration(format!("Config load error: {}", e)))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Build the plugin layer and serve until interrupted
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting HostDesk v{}", env!("CARGO_PKG_VERSION"));

    let mut registry = PluginRegistry::from_config(&config.plugins);
    registry.register(Arc::new(ManualPlugin::new()));

    match PackageManifest::load(&config.plugins.manifest) {
        Ok(manifest) => registry.resolve_versions(&manifest),
        Err(e) => tracing::warn!(
            manifest = %config.plugins.manifest,
            error = %e,
            "Package manifest unavailable, keeping declared plugin versions"
        ),
    }

    for descriptor in registry.list_all() {
        tracing::info!(
            plugin_id = %descriptor.id,
            name = %descriptor.name,
            version = descriptor.version.as_deref().unwrap_or("unknown"),
            enabled = registry.is_enabled(&descriptor.id),
            "Plugin available"
        );
    }

    let notifier = BroadcastNotifier::default();
    let controller = LifecycleController::new(
        Arc::new(MemoryServiceStore::new()),
        Arc::new(notifier.clone()),
        Arc::new(StaticLocalizer::from_config(&config.lifecycle)),
    );
    let manager = PluginManager::new(registry, controller);

    let menu = manager.dispatcher().invoke_folded::<AdminMenu>(&());
    tracing::info!(entries = menu.len(), "Admin menu assembled");

    let mut events = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(event_id = %event.id, payload = ?event.payload, "Domain event");
        }
    });

    tracing::info!("HostDesk ready, press Ctrl+C to stop");
    shutdown_signal().await;

    tracing::info!("Shutting down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
