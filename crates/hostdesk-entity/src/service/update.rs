//! Partial service update applied by the persistence collaborator.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::extra::ServiceExtra;
use super::model::ServiceRecord;
use super::status::ServiceStatus;

/// Fields to change on a service. `None` leaves a field untouched; `extra`
/// is merged into the stored attachment rather than replacing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    /// New lifecycle status.
    pub status: Option<ServiceStatus>,
    /// Keys to merge into `extra`.
    pub extra: Option<ServiceExtra>,
    /// New login secret.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

impl ServiceUpdate {
    /// An update that only moves the status.
    pub fn status(status: ServiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// An update that only replaces the password.
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Adds keys to merge into `extra`.
    pub fn merge_extra(mut self, extra: ServiceExtra) -> Self {
        match &mut self.extra {
            Some(existing) => existing.merge(extra),
            None => self.extra = Some(extra),
        }
        self
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.extra.is_none() && self.password.is_none()
    }

    /// Applies the update to `service` and bumps `updated_at`.
    pub fn apply(&self, service: &mut ServiceRecord) {
        if let Some(status) = self.status {
            service.status = status;
        }
        if let Some(extra) = &self.extra {
            service.extra.merge(extra.clone());
        }
        if let Some(password) = &self.password {
            service.password.clone_from(password);
        }
        service.updated_at = Utc::now();
    }
}
