//! Collaborator interfaces the lifecycle controller depends on, with
//! in-memory implementations for single-node use and tests.

pub mod events;
pub mod locale;
pub mod store;

pub use events::{BroadcastNotifier, EventNotifier};
pub use locale::{Localizer, StaticLocalizer};
pub use store::{MemoryServiceStore, ServiceStore};
