//! Service configuration reads: requirements per service type and document
//! templates.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::{RequiredRoles, authorize};
use crate::domain::port_error_mapping::map_template_repository_error;
use crate::domain::ports::{ConfigurationQuery, TemplateRepository};
use crate::domain::{
    DocumentTemplate, Error, Identity, Requirements, RequirementsCatalogue, Role, ServiceType,
};

#[derive(Clone)]
pub struct ConfigurationService<T> {
    catalogue: Arc<RequirementsCatalogue>,
    templates: Arc<T>,
}

impl<T> ConfigurationService<T> {
    pub fn new(catalogue: Arc<RequirementsCatalogue>, templates: Arc<T>) -> Self {
        Self {
            catalogue,
            templates,
        }
    }
}

#[async_trait]
impl<T> ConfigurationQuery for ConfigurationService<T>
where
    T: TemplateRepository,
{
    async fn required_documents(&self, service_type: &ServiceType) -> Result<Requirements, Error> {
        Ok(self.catalogue.requirements_for(service_type.as_ref()))
    }

    async fn templates(&self, caller: &Identity) -> Result<Vec<DocumentTemplate>, Error> {
        authorize(Some(caller), &RequiredRoles::only(Role::Administrator))?;
        self.templates
            .list()
            .await
            .map_err(map_template_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{FixtureTemplateRepository, MockTemplateRepository, TemplateRepositoryError};
    use crate::test_support::identity;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn totals_match_the_lists() {
        let service = ConfigurationService::new(
            Arc::new(RequirementsCatalogue::default()),
            Arc::new(FixtureTemplateRepository),
        );
        let requirements = service
            .required_documents(&ServiceType::new("installation").expect("valid type"))
            .await
            .expect("lookup succeeds");
        assert_eq!(
            requirements.total_required(),
            requirements.required_documents.len() + requirements.required_inspections.len()
        );
        assert!(requirements.total_required() > 0);
    }

    #[rstest]
    #[tokio::test]
    async fn templates_are_for_administrators() {
        let mut templates = MockTemplateRepository::new();
        templates.expect_list().times(0);
        let service =
            ConfigurationService::new(Arc::new(RequirementsCatalogue::default()), Arc::new(templates));

        let err = service
            .templates(&identity(Role::Employee))
            .await
            .expect_err("employee refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn template_query_failures_are_internal() {
        let mut templates = MockTemplateRepository::new();
        templates
            .expect_list()
            .return_once(|| Err(TemplateRepositoryError::query("relation missing")));
        let service =
            ConfigurationService::new(Arc::new(RequirementsCatalogue::default()), Arc::new(templates));

        let err = service
            .templates(&identity(Role::Administrator))
            .await
            .expect_err("query failure propagates");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
