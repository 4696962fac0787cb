//! Service persistence collaborator.

use dashmap::DashMap;

use hostdesk_core::error::AppError;
use hostdesk_core::result::AppResult;
use hostdesk_core::types::id::ServiceId;
use hostdesk_entity::{ServiceRecord, ServiceUpdate};

/// Storage for service records.
///
/// Each call is atomic on its own; the controller never spans a
/// transaction across records. Callers serialize concurrent commands
/// against the same service.
#[async_trait::async_trait]
pub trait ServiceStore: Send + Sync {
    /// Loads a service.
    async fn find(&self, id: ServiceId) -> AppResult<Option<ServiceRecord>>;

    /// Merges `update` into the stored service and returns the result.
    async fn update(&self, id: ServiceId, update: &ServiceUpdate) -> AppResult<ServiceRecord>;

    /// Inserts or overwrites a service.
    async fn save(&self, service: &ServiceRecord) -> AppResult<()>;
}

/// In-memory service store.
#[derive(Debug, Default)]
pub struct MemoryServiceStore {
    /// Service id → record.
    services: DashMap<ServiceId, ServiceRecord>,
}

impl MemoryServiceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[async_trait::async_trait]
impl ServiceStore for MemoryServiceStore {
    async fn find(&self, id: ServiceId) -> AppResult<Option<ServiceRecord>> {
        Ok(self.services.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: ServiceId, update: &ServiceUpdate) -> AppResult<ServiceRecord> {
        let mut entry = self
            .services
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Service '{id}' not found")))?;
        update.apply(entry.value_mut());
        Ok(entry.value().clone())
    }

    async fn save(&self, service: &ServiceRecord) -> AppResult<()> {
        self.services.insert(service.id, service.clone());
        Ok(())
    }
}
