//! Port for documents, inspections, and evidences attached to services.

use async_trait::async_trait;

use crate::domain::{ServiceId, ServiceRecord, ServiceRecords};

use super::define_port_error;

define_port_error! {
    /// Errors raised by service record repository adapters.
    pub enum ServiceRecordRepositoryError for "service record repository";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    /// Persist a new child record.
    async fn insert(&self, record: &ServiceRecord) -> Result<(), ServiceRecordRepositoryError>;

    /// All records of a service, oldest first within each kind.
    async fn list_for_service(
        &self,
        service_id: &ServiceId,
    ) -> Result<ServiceRecords, ServiceRecordRepositoryError>;
}
