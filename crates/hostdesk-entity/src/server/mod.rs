//! Provisioning server domain entities.

pub mod model;

pub use model::{ApiAccessAddress, Server};
