//! Driving port for service configuration reads.

use async_trait::async_trait;

use crate::domain::{DocumentTemplate, Error, Identity, Requirements, ServiceType};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigurationQuery: Send + Sync {
    /// Documents and inspections required for `service_type`.
    async fn required_documents(&self, service_type: &ServiceType) -> Result<Requirements, Error>;

    /// Administrator document templates.
    async fn templates(&self, caller: &Identity) -> Result<Vec<DocumentTemplate>, Error>;
}
