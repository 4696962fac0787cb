//! Hosting-service lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::id::ServiceId;

/// Events announced after a successful service status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServiceEvent {
    /// The service was provisioned and is now active.
    Activated {
        /// The service ID.
        service_id: ServiceId,
    },
    /// The service was suspended.
    Suspended {
        /// The service ID.
        service_id: ServiceId,
        /// Whether the customer should be mailed about it.
        mail: bool,
    },
    /// The service was reactivated after a suspension.
    Unsuspended {
        /// The service ID.
        service_id: ServiceId,
        /// Whether the customer should be mailed about it.
        mail: bool,
    },
    /// The service was destroyed.
    Terminated {
        /// The service ID.
        service_id: ServiceId,
    },
}

impl ServiceEvent {
    /// The service this event is about.
    pub fn service_id(&self) -> ServiceId {
        match self {
            Self::Activated { service_id }
            | Self::Suspended { service_id, .. }
            | Self::Unsuspended { service_id, .. }
            | Self::Terminated { service_id } => *service_id,
        }
    }

    /// Short event name, as used by log lines and mail templates.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activated { .. } => "service_activated",
            Self::Suspended { .. } => "service_suspended",
            Self::Unsuspended { .. } => "service_unsuspended",
            Self::Terminated { .. } => "service_terminated",
        }
    }
}
