//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use crate::descriptor::{PluginInfo, PluginKind};
pub use crate::hooks::definitions::{
    AdminMenu, FoldedHook, HookSpec, MenuItem, ServiceDetail, UserMenu,
};
pub use crate::hooks::registry::HookDeclarations;
pub use crate::registry::Plugin;
pub use crate::server::{
    CommandPayload, CommandResult, CommandTable, ConfigField, ConfigSchema, ConfigSection,
    FieldKind, ServerBinding, ServerPlugin,
};

pub use crate::plugin_info;
