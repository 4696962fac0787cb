//! Service status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a hosting service.
///
/// `pending → active → {suspended, terminated}`, `suspended → {active,
/// terminated}`; `terminated` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Ordered but not provisioned yet.
    #[default]
    Pending,
    /// Provisioned and running.
    Active,
    /// Provisioned but disabled.
    Suspended,
    /// Destroyed on the backend.
    Terminated,
}

impl ServiceStatus {
    /// Check if the service is in its absorbing state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Check if moving to `next` follows the lifecycle graph.
    pub fn can_transition_to(&self, next: ServiceStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active)
                | (Self::Active, Self::Suspended)
                | (Self::Active, Self::Terminated)
                | (Self::Suspended, Self::Active)
                | (Self::Suspended, Self::Terminated)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = hostdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "terminated" => Ok(Self::Terminated),
            _ => Err(hostdesk_core::AppError::validation(format!(
                "Invalid service status: '{s}'. Expected one of: pending, active, suspended, terminated"
            ))),
        }
    }
}
