//! Read scoping and ordering rules for service lists.
//!
//! Every list a caller can see is described by a [`ServiceListQuery`]. Stores
//! translate the query into their own filter language; the in-memory store and
//! tests use [`ServiceListQuery::matches`] and [`ServiceListQuery::apply`]
//! directly so both adapters order and cap results the same way.

use std::cmp::Ordering;

use super::{Error, Identity, Role, Service, ServiceStatus, UserId};

/// Most entries a completed list returns.
pub const COMPLETED_LIST_LIMIT: usize = 50;

/// Named list a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceView {
    /// Administrator queue of unassigned requests.
    Pending,
    /// Employee work assigned but not started.
    Assigned,
    /// Employee work under way.
    InProgress,
    /// Finished work: every service for administrators, own work for employees.
    Completed,
    /// A client's own requests.
    Mine,
}

/// Sort order of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOrdering {
    /// Soonest `startDate` first; ties broken by id.
    StartDateAscending,
    /// Most recent `completedAt` first; ties broken by id.
    CompletedAtDescending,
}

/// Filter, ordering, and cap for a service list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceListQuery {
    pub status: Option<ServiceStatus>,
    pub employee_id: Option<UserId>,
    pub client_id: Option<UserId>,
    pub ordering: ServiceOrdering,
    pub limit: Option<usize>,
}

impl ServiceListQuery {
    /// Every `PENDING` service.
    pub fn pending() -> Self {
        Self {
            status: Some(ServiceStatus::Pending),
            employee_id: None,
            client_id: None,
            ordering: ServiceOrdering::StartDateAscending,
            limit: None,
        }
    }

    /// The most recent completed services across all employees.
    pub fn all_completed() -> Self {
        Self {
            status: Some(ServiceStatus::Completed),
            employee_id: None,
            client_id: None,
            ordering: ServiceOrdering::CompletedAtDescending,
            limit: Some(COMPLETED_LIST_LIMIT),
        }
    }

    /// Services assigned to `employee` in `status`.
    pub fn for_employee(employee: UserId, status: ServiceStatus) -> Self {
        let completed = status == ServiceStatus::Completed;
        Self {
            status: Some(status),
            employee_id: Some(employee),
            client_id: None,
            ordering: if completed {
                ServiceOrdering::CompletedAtDescending
            } else {
                ServiceOrdering::StartDateAscending
            },
            limit: completed.then_some(COMPLETED_LIST_LIMIT),
        }
    }

    /// Requests owned by `client`, optionally narrowed to one status.
    pub fn for_client(client: UserId, status: Option<ServiceStatus>) -> Self {
        Self {
            status,
            employee_id: None,
            client_id: Some(client),
            ordering: ServiceOrdering::StartDateAscending,
            limit: None,
        }
    }

    /// Resolve `view` for `caller`, refusing views the role has no scope for.
    pub fn scoped(caller: &Identity, view: ServiceView) -> Result<Self, Error> {
        match (caller.role, view) {
            (Role::Administrator, ServiceView::Pending) => Ok(Self::pending()),
            (Role::Administrator, ServiceView::Completed) => Ok(Self::all_completed()),
            (Role::Employee, ServiceView::Assigned) => {
                Ok(Self::for_employee(caller.id, ServiceStatus::Assigned))
            }
            (Role::Employee, ServiceView::InProgress) => {
                Ok(Self::for_employee(caller.id, ServiceStatus::InProgress))
            }
            (Role::Employee, ServiceView::Completed) => {
                Ok(Self::for_employee(caller.id, ServiceStatus::Completed))
            }
            (Role::Client, ServiceView::Mine) => Ok(Self::for_client(caller.id, None)),
            (role, _) => Err(Error::forbidden(format!(
                "role {role} has no access to this service list"
            ))),
        }
    }

    /// Whether `service` passes the filter part of the query.
    pub fn matches(&self, service: &Service) -> bool {
        self.status.is_none_or(|status| service.status() == status)
            && self
                .employee_id
                .is_none_or(|employee| service.employee_id() == Some(employee))
            && self
                .client_id
                .is_none_or(|client| service.client_id() == client)
    }

    /// Compare two services under this query's ordering.
    pub fn compare(&self, a: &Service, b: &Service) -> Ordering {
        match self.ordering {
            ServiceOrdering::StartDateAscending => a
                .start_date()
                .cmp(&b.start_date())
                .then_with(|| a.id().cmp(&b.id())),
            ServiceOrdering::CompletedAtDescending => b
                .completed_at()
                .cmp(&a.completed_at())
                .then_with(|| a.id().cmp(&b.id())),
        }
    }

    /// Filter, order, and cap `services`.
    pub fn apply(&self, services: impl IntoIterator<Item = Service>) -> Vec<Service> {
        let mut selected: Vec<Service> = services.into_iter().filter(|s| self.matches(s)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Whether `caller` may read `service`.
///
/// Administrators see everything; employees only work assigned to them;
/// clients only their own requests.
pub fn can_view(caller: &Identity, service: &Service) -> bool {
    match caller.role {
        Role::Administrator => true,
        Role::Employee => service.is_assigned_to(caller.id),
        Role::Client => service.client_id() == caller.id,
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
