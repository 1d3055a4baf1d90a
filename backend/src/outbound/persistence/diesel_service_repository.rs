//! PostgreSQL-backed `ServiceRepository`.
//!
//! Status transitions are a single `UPDATE ... WHERE id = $1 AND status = $2`;
//! the affected row count tells the domain whether it won the race.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ServiceRepository, ServiceRepositoryError};
use crate::domain::{
    Service, ServiceId, ServiceListQuery, ServiceOrdering, ServiceParts, ServiceStatus,
    ServiceType, UserId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ServiceRow, ServiceTransitionChangeset};
use super::pool::{DbPool, PoolError};
use super::schema::services;

/// Diesel implementation of [`ServiceRepository`].
#[derive(Clone)]
pub struct DieselServiceRepository {
    pool: DbPool,
}

impl DieselServiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ServiceRepositoryError {
    map_pool_error(error, ServiceRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> ServiceRepositoryError {
    map_diesel_error(
        error,
        ServiceRepositoryError::query,
        ServiceRepositoryError::connection,
    )
}

pub(crate) fn service_to_row(service: &Service) -> ServiceRow {
    ServiceRow {
        id: *service.id().as_uuid(),
        client_id: *service.client_id().as_uuid(),
        employee_id: service.employee_id().map(|id| *id.as_uuid()),
        status: service.status().as_str().to_owned(),
        service_type: service.service_type().as_ref().to_owned(),
        start_date: service.start_date(),
        completed_at: service.completed_at(),
        created_at: service.created_at(),
    }
}

fn row_to_service(row: ServiceRow) -> Result<Service, ServiceRepositoryError> {
    let decode = |message: String| {
        warn!(service_id = %row.id, %message, "stored service row is invalid");
        ServiceRepositoryError::query(format!("stored service {} is invalid", row.id))
    };
    let status: ServiceStatus = row.status.parse().map_err(|e| decode(format!("{e}")))?;
    let service_type = ServiceType::new(&row.service_type).map_err(|e| decode(format!("{e}")))?;
    Service::restore(ServiceParts {
        id: ServiceId::from_uuid(row.id),
        client_id: UserId::from_uuid(row.client_id),
        employee_id: row.employee_id.map(UserId::from_uuid),
        status,
        service_type,
        start_date: row.start_date,
        completed_at: row.completed_at,
        created_at: row.created_at,
    })
    .map_err(|e| decode(format!("{e}")))
}

#[async_trait]
impl ServiceRepository for DieselServiceRepository {
    async fn insert(&self, service: &Service) -> Result<(), ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(services::table)
            .values(service_to_row(service))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = services::table
            .filter(services::id.eq(*id.as_uuid()))
            .select(ServiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_service).transpose()
    }

    async fn list(&self, query: &ServiceListQuery) -> Result<Vec<Service>, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut statement = services::table
            .select(ServiceRow::as_select())
            .into_boxed();
        if let Some(status) = query.status {
            statement = statement.filter(services::status.eq(status.as_str()));
        }
        if let Some(employee) = query.employee_id {
            statement = statement.filter(services::employee_id.eq(*employee.as_uuid()));
        }
        if let Some(client) = query.client_id {
            statement = statement.filter(services::client_id.eq(*client.as_uuid()));
        }
        statement = match query.ordering {
            ServiceOrdering::StartDateAscending => {
                statement.order((services::start_date.asc(), services::id.asc()))
            }
            ServiceOrdering::CompletedAtDescending => {
                statement.order((services::completed_at.desc(), services::id.asc()))
            }
        };
        if let Some(limit) = query.limit {
            statement = statement.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows: Vec<ServiceRow> = statement.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(row_to_service).collect()
    }

    async fn transition(
        &self,
        updated: &Service,
        expected: ServiceStatus,
    ) -> Result<bool, ServiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ServiceTransitionChangeset {
            employee_id: updated.employee_id().map(|id| *id.as_uuid()),
            status: updated.status().as_str(),
            completed_at: updated.completed_at(),
        };
        let affected = diesel::update(
            services::table
                .filter(services::id.eq(*updated.id().as_uuid()))
                .filter(services::status.eq(expected.as_str())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;
        Ok(affected == 1)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; queries run against a live database only.
    use super::*;
    use crate::test_support::fixture_epoch;
    use rstest::rstest;

    fn requested() -> Service {
        Service::request(
            ServiceId::random(),
            UserId::random(),
            ServiceType::new("repair").expect("type"),
            fixture_epoch(),
            fixture_epoch(),
        )
    }

    #[rstest]
    fn rows_round_trip_through_the_domain() {
        let service = requested().assign(UserId::random()).expect("assign");
        let restored = row_to_service(service_to_row(&service)).expect("restore");
        assert_eq!(restored, service);
    }

    #[rstest]
    fn unknown_status_is_a_query_error() {
        let mut row = service_to_row(&requested());
        row.status = "ARCHIVED".to_owned();
        let err = row_to_service(row).expect_err("invalid status");
        assert!(matches!(err, ServiceRepositoryError::Query { .. }));
    }

    #[rstest]
    fn inconsistent_rows_are_rejected() {
        let mut row = service_to_row(&requested());
        row.status = "ASSIGNED".to_owned();
        let err = row_to_service(row).expect_err("assigned without employee");
        assert!(matches!(err, ServiceRepositoryError::Query { .. }));
    }
}
