//! PostgreSQL-backed `TemplateRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TemplateRepository, TemplateRepositoryError};
use crate::domain::{DocumentTemplate, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::TemplateRow;
use super::pool::DbPool;
use super::schema::document_templates;

/// Diesel implementation of [`TemplateRepository`].
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<TemplateRow> for DocumentTemplate {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            user_id: UserId::from_uuid(row.user_id),
        }
    }
}

impl From<&DocumentTemplate> for TemplateRow {
    fn from(template: &DocumentTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            user_id: *template.user_id.as_uuid(),
            created_at: template.created_at,
        }
    }
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn list(&self) -> Result<Vec<DocumentTemplate>, TemplateRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_pool_error(e, TemplateRepositoryError::connection))?;
        let rows: Vec<TemplateRow> = document_templates::table
            .order((
                document_templates::created_at.desc(),
                document_templates::id.asc(),
            ))
            .select(TemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| {
                map_diesel_error(
                    e,
                    TemplateRepositoryError::query,
                    TemplateRepositoryError::connection,
                )
            })?;
        Ok(rows.into_iter().map(DocumentTemplate::from).collect())
    }
}
