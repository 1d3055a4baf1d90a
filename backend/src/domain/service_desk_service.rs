//! Service workflow use-cases.
//!
//! [`ServiceDeskService`] implements both service driving ports. It applies
//! the access policy to the caller, resolves visibility before any mutation,
//! and persists status changes as compare-and-set transitions so concurrent
//! callers cannot both win.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::access::{RequiredRoles, authorize};
use crate::domain::port_error_mapping::{
    map_record_repository_error, map_service_repository_error, map_user_repository_error,
};
use crate::domain::ports::{
    NewServiceRequest, ServiceDeskCommand, ServiceDeskQuery, ServiceDetail,
    ServiceRecordRepository, ServiceRepository, UserRepository,
};
use crate::domain::{
    Error, Identity, RecordDraft, Role, Service, ServiceAction, ServiceId, ServiceListQuery,
    ServiceRecord, ServiceStatus, ServiceView, UserId, can_view,
};

/// Workflow service over the service, record, and user stores.
#[derive(Clone)]
pub struct ServiceDeskService<S, R, U> {
    services: Arc<S>,
    records: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<S, R, U> ServiceDeskService<S, R, U> {
    pub fn new(services: Arc<S>, records: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            services,
            records,
            users,
            clock,
        }
    }
}

impl<S, R, U> ServiceDeskService<S, R, U>
where
    S: ServiceRepository,
    R: ServiceRecordRepository,
    U: UserRepository,
{
    /// Load a service the caller may see; hidden services read as missing.
    async fn find_visible(&self, caller: &Identity, service_id: ServiceId) -> Result<Service, Error> {
        self.services
            .find_by_id(&service_id)
            .await
            .map_err(map_service_repository_error)?
            .filter(|service| can_view(caller, service))
            .ok_or_else(|| Error::not_found(format!("service {service_id} not found")))
    }

    async fn ensure_employee(&self, employee_id: UserId) -> Result<(), Error> {
        let employee = self
            .users
            .find_by_id(&employee_id)
            .await
            .map_err(map_user_repository_error)?;
        match employee {
            Some(user) if user.role() == Role::Employee => Ok(()),
            _ => Err(
                Error::invalid_request(format!("user {employee_id} is not an employee"))
                    .with_details(json!({ "field": "employeeId", "code": "not_an_employee" })),
            ),
        }
    }

    async fn persist_transition(
        &self,
        updated: Service,
        action: ServiceAction,
    ) -> Result<Service, Error> {
        let applied = self
            .services
            .transition(&updated, action.expected_status())
            .await
            .map_err(map_service_repository_error)?;
        if !applied {
            tracing::info!(service_id = %updated.id(), %action, "transition lost a race");
            return Err(Error::invalid_transition(format!(
                "service {} changed before it could {action}",
                updated.id()
            )));
        }
        tracing::info!(
            service_id = %updated.id(),
            status = %updated.status(),
            "service transitioned"
        );
        Ok(updated)
    }
}

#[async_trait]
impl<S, R, U> ServiceDeskCommand for ServiceDeskService<S, R, U>
where
    S: ServiceRepository,
    R: ServiceRecordRepository,
    U: UserRepository,
{
    async fn request_service(
        &self,
        caller: &Identity,
        request: NewServiceRequest,
    ) -> Result<Service, Error> {
        let caller = authorize(Some(caller), &RequiredRoles::only(Role::Client))?;
        let service = Service::request(
            ServiceId::random(),
            caller.id,
            request.service_type,
            request.start_date,
            self.clock.utc(),
        );
        self.services
            .insert(&service)
            .await
            .map_err(map_service_repository_error)?;
        tracing::info!(service_id = %service.id(), client_id = %caller.id, "service requested");
        Ok(service)
    }

    async fn assign(
        &self,
        caller: &Identity,
        service_id: ServiceId,
        employee_id: UserId,
    ) -> Result<Service, Error> {
        let caller = authorize(Some(caller), &RequiredRoles::only(Role::Administrator))?;
        let service = self.find_visible(caller, service_id).await?;
        let updated = service.assign(employee_id)?;
        self.ensure_employee(employee_id).await?;
        self.persist_transition(updated, ServiceAction::Assign).await
    }

    async fn start(&self, caller: &Identity, service_id: ServiceId) -> Result<Service, Error> {
        let caller = authorize(Some(caller), &RequiredRoles::only(Role::Employee))?;
        let service = self.find_visible(caller, service_id).await?;
        let updated = service.start(caller.id)?;
        self.persist_transition(updated, ServiceAction::Start).await
    }

    async fn complete(&self, caller: &Identity, service_id: ServiceId) -> Result<Service, Error> {
        let caller = authorize(Some(caller), &RequiredRoles::only(Role::Employee))?;
        let service = self.find_visible(caller, service_id).await?;
        let updated = service.complete(caller.id, self.clock.utc())?;
        self.persist_transition(updated, ServiceAction::Complete).await
    }

    async fn add_record(
        &self,
        caller: &Identity,
        service_id: ServiceId,
        draft: RecordDraft,
    ) -> Result<ServiceRecord, Error> {
        let caller = authorize(Some(caller), &RequiredRoles::only(Role::Employee))?;
        let service = self.find_visible(caller, service_id).await?;
        if service.status() != ServiceStatus::InProgress {
            return Err(Error::conflict(format!(
                "records can only be added while a service is {}; service {service_id} is {}",
                ServiceStatus::InProgress,
                service.status()
            )));
        }
        let record = draft.into_record(Uuid::new_v4(), service_id, self.clock.utc());
        self.records
            .insert(&record)
            .await
            .map_err(map_record_repository_error)?;
        Ok(record)
    }
}

#[async_trait]
impl<S, R, U> ServiceDeskQuery for ServiceDeskService<S, R, U>
where
    S: ServiceRepository,
    R: ServiceRecordRepository,
    U: UserRepository,
{
    async fn list(&self, caller: &Identity, view: ServiceView) -> Result<Vec<Service>, Error> {
        let query = ServiceListQuery::scoped(caller, view)?;
        self.services
            .list(&query)
            .await
            .map_err(map_service_repository_error)
    }

    async fn detail(&self, caller: &Identity, service_id: ServiceId) -> Result<ServiceDetail, Error> {
        let service = self.find_visible(caller, service_id).await?;
        let records = self
            .records
            .list_for_service(&service_id)
            .await
            .map_err(map_record_repository_error)?;
        Ok(ServiceDetail { service, records })
    }
}

#[cfg(test)]
#[path = "service_desk_service_tests.rs"]
mod tests;
