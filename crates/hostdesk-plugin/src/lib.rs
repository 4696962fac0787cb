//! # hostdesk-plugin
//!
//! Plugin framework for HostDesk. Provides:
//!
//! - Plugin descriptors, the enabled-plugin set and package-manifest version
//!   resolution
//! - A typed hook table and a dispatcher with all / first / last / fold
//!   strategies
//! - The plugin registry, the single place that decides which plugin's hooks
//!   are live
//! - The provisioning backend contract ("server plugins") and the lifecycle
//!   controller that turns backend results into service status transitions
//! - Collaborator interfaces (service store, notifications, localization)
//!   with in-memory defaults

pub mod api;
pub mod descriptor;
pub mod enabled;
pub mod hooks;
pub mod macros;
pub mod manager;
pub mod manifest;
pub mod prelude;
pub mod registry;
pub mod server;

pub use descriptor::{PluginDescriptor, PluginInfo, PluginKind, VersionSource};
pub use enabled::EnabledSet;
pub use hooks::{HookDeclarations, HookDispatcher, HookResults, HookSpec, HookTable};
pub use manager::PluginManager;
pub use manifest::PackageManifest;
pub use registry::{Plugin, PluginRegistry};
pub use server::{
    CommandPayload, CommandResult, LifecycleCommand, LifecycleController, ServerBinding,
    ServerPlugin,
};
