//! Typed hooks and their dispatch.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{AdminMenu, FoldedHook, HookSpec, MenuItem, ServiceDetail, UserMenu};
pub use dispatcher::{HookDispatcher, HookResults};
pub use registry::{HookDeclarations, HookTable};
