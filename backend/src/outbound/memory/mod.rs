//! In-memory store implementing every repository port.
//!
//! Used when no database URL is configured and as the store behind
//! end-to-end HTTP tests. All ports share one lock, so a status
//! compare-and-set and the write it guards happen atomically.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::demo_data::DemoData;
use crate::domain::ports::{
    ServiceRecordRepository, ServiceRecordRepositoryError, ServiceRepository,
    ServiceRepositoryError, TemplateRepository, TemplateRepositoryError, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    DocumentTemplate, Role, Service, ServiceId, ServiceListQuery, ServiceRecord, ServiceRecords,
    ServiceStatus, User, UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    services: HashMap<ServiceId, Service>,
    records: Vec<ServiceRecord>,
    templates: Vec<DocumentTemplate>,
}

/// Thread-safe, process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Option<RwLockReadGuard<'_, StoreState>> {
        self.state.read().ok()
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().ok()
    }

    /// Add `user`, replacing any account with the same id.
    pub fn put_user(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut state = self.write().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        state.users.insert(user.id(), user);
        Ok(())
    }

    /// Add `service`, replacing any service with the same id.
    pub fn put_service(&self, service: Service) -> Result<(), ServiceRepositoryError> {
        let mut state = self
            .write()
            .ok_or_else(|| ServiceRepositoryError::query(POISONED))?;
        state.services.insert(service.id(), service);
        Ok(())
    }

    /// Load the demo set. Existing entries with the same ids are replaced.
    pub fn seed(&self, data: DemoData) -> Result<(), ServiceRepositoryError> {
        let mut state = self
            .write()
            .ok_or_else(|| ServiceRepositoryError::query(POISONED))?;
        for user in data.users {
            state.users.insert(user.id(), user);
        }
        for service in data.services {
            state.services.insert(service.id(), service);
        }
        state
            .templates
            .retain(|existing| data.templates.iter().all(|t| t.id != existing.id));
        state.templates.extend(data.templates);
        Ok(())
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn insert(&self, service: &Service) -> Result<(), ServiceRepositoryError> {
        self.put_service(service.clone())
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError> {
        let state = self
            .read()
            .ok_or_else(|| ServiceRepositoryError::query(POISONED))?;
        Ok(state.services.get(id).cloned())
    }

    async fn list(&self, query: &ServiceListQuery) -> Result<Vec<Service>, ServiceRepositoryError> {
        let state = self
            .read()
            .ok_or_else(|| ServiceRepositoryError::query(POISONED))?;
        Ok(query.apply(state.services.values().cloned()))
    }

    async fn transition(
        &self,
        updated: &Service,
        expected: ServiceStatus,
    ) -> Result<bool, ServiceRepositoryError> {
        let mut state = self
            .write()
            .ok_or_else(|| ServiceRepositoryError::query(POISONED))?;
        match state.services.get_mut(&updated.id()) {
            Some(stored) if stored.status() == expected => {
                *stored = updated.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.read().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let state = self.read().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state.users.values().find(|u| u.email() == email).cloned())
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.read().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|u| role.is_none_or(|r| u.role() == r))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        Ok(users)
    }

    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut state = self.write().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        match state.users.get_mut(&user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ServiceRecordRepository for MemoryStore {
    async fn insert(&self, record: &ServiceRecord) -> Result<(), ServiceRecordRepositoryError> {
        let mut state = self
            .write()
            .ok_or_else(|| ServiceRecordRepositoryError::query(POISONED))?;
        state.records.push(record.clone());
        Ok(())
    }

    async fn list_for_service(
        &self,
        service_id: &ServiceId,
    ) -> Result<ServiceRecords, ServiceRecordRepositoryError> {
        let state = self
            .read()
            .ok_or_else(|| ServiceRecordRepositoryError::query(POISONED))?;
        let mut records = ServiceRecords::default();
        // Insertion order is creation order.
        for record in state.records.iter().filter(|r| r.service_id() == *service_id) {
            match record {
                ServiceRecord::Document(doc) => records.documents.push(doc.clone()),
                ServiceRecord::Inspection(ins) => records.inspections.push(ins.clone()),
                ServiceRecord::Evidence(ev) => records.evidences.push(ev.clone()),
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl TemplateRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<DocumentTemplate>, TemplateRepositoryError> {
        let state = self
            .read()
            .ok_or_else(|| TemplateRepositoryError::query(POISONED))?;
        let mut templates = state.templates.clone();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(templates)
    }
}
