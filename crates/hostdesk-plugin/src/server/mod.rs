//! Provisioning backends ("server plugins") and the lifecycle controller
//! that applies their results to services.

pub mod binding;
pub mod command;
pub mod contract;
pub mod controller;

pub use binding::{DEFAULT_PORT, ServerBinding};
pub use command::{CommandAccess, CommandPayload, CommandResult, CommandTable, LifecycleCommand};
pub use contract::{ConfigField, ConfigSchema, ConfigSection, FieldKind, ServerPlugin};
pub use controller::LifecycleController;
