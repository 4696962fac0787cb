//! # hostdesk-entity
//!
//! Entity models the plugin layer reads but does not own. Persistence of
//! these records belongs to the host application; every struct here is a
//! plain value that derives `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod product;
pub mod server;
pub mod service;

pub use product::Product;
pub use server::{ApiAccessAddress, Server};
pub use service::{ServiceExtra, ServiceRecord, ServiceStatus, ServiceUpdate};
