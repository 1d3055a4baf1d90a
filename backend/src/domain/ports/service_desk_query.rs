//! Driving port for scoped service reads.

use async_trait::async_trait;

use crate::domain::{Error, Identity, Service, ServiceId, ServiceRecords, ServiceView};

/// A service together with its child records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetail {
    pub service: Service,
    pub records: ServiceRecords,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceDeskQuery: Send + Sync {
    /// The list named by `view`, scoped to the caller.
    async fn list(&self, caller: &Identity, view: ServiceView) -> Result<Vec<Service>, Error>;

    /// One service with its records; `NotFound` when absent or not visible.
    async fn detail(&self, caller: &Identity, service_id: ServiceId) -> Result<ServiceDetail, Error>;
}
