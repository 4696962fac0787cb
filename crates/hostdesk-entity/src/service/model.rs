//! Service entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hostdesk_core::types::id::{ProductId, ServerId, ServiceId};

use super::extra::ServiceExtra;
use super::status::ServiceStatus;

/// One customer subscription provisioned on a server.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Unique service identifier.
    pub id: ServiceId,
    /// Product this service was ordered from.
    pub product_id: ProductId,
    /// Server the service lives on, once assigned.
    pub server_id: Option<ServerId>,
    /// Login name on the backend.
    pub username: String,
    /// Current login secret on the backend. Never serialized; comes back
    /// empty on deserialization.
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Primary domain, when the product has one.
    pub domain: Option<String>,
    /// Lifecycle status. Only the lifecycle controller changes it.
    pub status: ServiceStatus,
    /// Backend-specific state.
    #[serde(default)]
    pub extra: ServiceExtra,
    /// When the service was created.
    pub created_at: DateTime<Utc>,
    /// When the service was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Creates a pending service for `product_id`.
    pub fn new(
        product_id: ProductId,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ServiceId::new(),
            product_id,
            server_id: None,
            username: username.into(),
            password: password.into(),
            domain: None,
            status: ServiceStatus::Pending,
            extra: ServiceExtra::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the hosting server.
    pub fn on_server(mut self, server_id: ServerId) -> Self {
        self.server_id = Some(server_id);
        self
    }

    /// Sets the primary domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the status. Intended for seeding records, not for lifecycle moves.
    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = status;
        self
    }
}

impl fmt::Debug for ServiceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRecord")
            .field("id", &self.id)
            .field("product_id", &self.product_id)
            .field("server_id", &self.server_id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("status", &self.status)
            .field("extra", &self.extra)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
