//! Manual provisioning backend for HostDesk.
//!
//! For products that have no control panel API: every lifecycle action
//! succeeds immediately and is logged for an operator to carry out by hand.

pub mod backend;
pub mod hooks;
pub mod plugin;

pub use backend::ManualBackend;
pub use plugin::ManualPlugin;
