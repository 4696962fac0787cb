//! Shared value types.

pub mod id;

pub use id::{ProductId, ServerId, ServiceId};
