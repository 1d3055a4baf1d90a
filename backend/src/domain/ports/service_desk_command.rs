//! Driving port for service workflow mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Error, Identity, RecordDraft, Service, ServiceId, ServiceRecord, ServiceType, UserId,
};

/// Validated client request for new work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub service_type: ServiceType,
    pub start_date: DateTime<Utc>,
}

/// Use-cases that change services or attach records to them.
///
/// Every method takes the caller explicitly. Services the caller may not see
/// are reported as not found.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceDeskCommand: Send + Sync {
    /// A client asks for new work; the service starts `PENDING`.
    async fn request_service(
        &self,
        caller: &Identity,
        request: NewServiceRequest,
    ) -> Result<Service, Error>;

    /// An administrator assigns a pending service to an employee.
    async fn assign(
        &self,
        caller: &Identity,
        service_id: ServiceId,
        employee_id: UserId,
    ) -> Result<Service, Error>;

    /// The assigned employee starts work.
    async fn start(&self, caller: &Identity, service_id: ServiceId) -> Result<Service, Error>;

    /// The assigned employee finishes work.
    async fn complete(&self, caller: &Identity, service_id: ServiceId) -> Result<Service, Error>;

    /// The assigned employee files a document, inspection, or evidence.
    async fn add_record(
        &self,
        caller: &Identity,
        service_id: ServiceId,
        draft: RecordDraft,
    ) -> Result<ServiceRecord, Error>;
}
