//! Port for service request persistence.

use async_trait::async_trait;

use crate::domain::{Service, ServiceId, ServiceListQuery, ServiceStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by service repository adapters.
    pub enum ServiceRepositoryError for "service repository";
}

/// Port for reading and advancing service requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Persist a newly requested service.
    async fn insert(&self, service: &Service) -> Result<(), ServiceRepositoryError>;

    /// Find a service by id, regardless of who may see it.
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError>;

    /// List services matching `query`, ordered and capped as it describes.
    async fn list(&self, query: &ServiceListQuery) -> Result<Vec<Service>, ServiceRepositoryError>;

    /// Store `updated` only if the stored status still equals `expected`.
    ///
    /// Returns `false` when the stored record moved on (or vanished) since it
    /// was read; nothing is written in that case.
    async fn transition(
        &self,
        updated: &Service,
        expected: ServiceStatus,
    ) -> Result<bool, ServiceRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_formats_message() {
        let err = ServiceRepositoryError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "service repository connection failed: pool exhausted"
        );
    }
}
