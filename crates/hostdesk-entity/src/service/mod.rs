//! Hosting service domain entities.

pub mod extra;
pub mod model;
pub mod status;
pub mod update;

pub use extra::ServiceExtra;
pub use model::ServiceRecord;
pub use status::ServiceStatus;
pub use update::ServiceUpdate;
