//! Port for administrator document templates.

use async_trait::async_trait;

use crate::domain::DocumentTemplate;

use super::define_port_error;

define_port_error! {
    /// Errors raised by template repository adapters.
    pub enum TemplateRepositoryError for "template repository";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Every template, newest first.
    async fn list(&self) -> Result<Vec<DocumentTemplate>, TemplateRepositoryError>;
}

/// Fixture implementation with no templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTemplateRepository;

#[async_trait]
impl TemplateRepository for FixtureTemplateRepository {
    async fn list(&self) -> Result<Vec<DocumentTemplate>, TemplateRepositoryError> {
        Ok(Vec::new())
    }
}
