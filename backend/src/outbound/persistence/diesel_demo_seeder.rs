//! Writes the demo data set into PostgreSQL.
//!
//! Runs in one transaction. Every insert is `ON CONFLICT (id) DO NOTHING`, so
//! reseeding leaves rows that already exist (including their current
//! workflow state) untouched.

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::info;

use crate::demo_data::DemoData;
use crate::domain::ports::ServiceRepositoryError;

use super::diesel_service_repository::service_to_row;
use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, ServiceRow, TemplateRow};
use super::pool::DbPool;
use super::schema::{document_templates, services, users};

/// Demo data writer for database-backed deployments.
#[derive(Clone)]
pub struct DieselDemoSeeder {
    pool: DbPool,
}

impl DieselDemoSeeder {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert any demo rows that are missing.
    ///
    /// # Errors
    /// Pool or query failures, reported as [`ServiceRepositoryError`].
    pub async fn seed(&self, data: &DemoData) -> Result<(), ServiceRepositoryError> {
        let user_rows: Vec<NewUserRow<'_>> = data
            .users
            .iter()
            .map(|user| NewUserRow {
                id: *user.id().as_uuid(),
                role: user.role().as_str(),
                name: user.name(),
                email: user.email(),
                phone: user.phone(),
            })
            .collect();
        let service_rows: Vec<ServiceRow> = data.services.iter().map(service_to_row).collect();
        let template_rows: Vec<TemplateRow> =
            data.templates.iter().map(TemplateRow::from).collect();

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| map_pool_error(e, ServiceRepositoryError::connection))?;

        let (users_added, services_added, templates_added) = conn
            .transaction(|conn| {
                async move {
                    let users_added = diesel::insert_into(users::table)
                        .values(&user_rows)
                        .on_conflict(users::id)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    let services_added = diesel::insert_into(services::table)
                        .values(&service_rows)
                        .on_conflict(services::id)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    let templates_added = diesel::insert_into(document_templates::table)
                        .values(&template_rows)
                        .on_conflict(document_templates::id)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((users_added, services_added, templates_added))
                }
                .scope_boxed()
            })
            .await
            .map_err(|e| {
                map_diesel_error(
                    e,
                    ServiceRepositoryError::query,
                    ServiceRepositoryError::connection,
                )
            })?;

        info!(
            users_added,
            services_added, templates_added, "demo data seeded into database"
        );
        Ok(())
    }
}
