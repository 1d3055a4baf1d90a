//! Service requests and their status lifecycle.
//!
//! A [`Service`] moves forward only:
//! `PENDING → ASSIGNED → IN_PROGRESS → COMPLETED`.
//!
//! Transitions consume the value and return the advanced service, leaving the
//! caller's stored copy untouched when they fail. Persisting the result is a
//! compare-and-set on the previous status; see
//! [`crate::domain::ports::ServiceRepository::transition`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Error, UserId};

/// Maximum number of characters in a service type label.
pub const SERVICE_TYPE_MAX: usize = 80;

/// Stable service identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(Uuid);

impl ServiceId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
}

impl ServiceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Assigned => "ASSIGNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Whether a service in this status must have an employee.
    pub const fn requires_employee(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = ServiceValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ASSIGNED" => Ok(Self::Assigned),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(ServiceValidationError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Validation errors for service fields and stored records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceValidationError {
    #[error("serviceType must not be empty")]
    EmptyServiceType,
    #[error("serviceType must be at most {max} characters")]
    ServiceTypeTooLong { max: usize },
    #[error("unknown service status: {0}")]
    UnknownStatus(String),
    #[error("a {status} service must have an assigned employee")]
    MissingEmployee { status: ServiceStatus },
    #[error("a PENDING service must not have an assigned employee")]
    UnexpectedEmployee,
    #[error("completedAt must be set exactly when the service is COMPLETED")]
    CompletionMismatch,
}

/// Free-form category of work a client asks for, such as `"inspection"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceType(String);

impl ServiceType {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ServiceValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(ServiceValidationError::EmptyServiceType);
        }
        if value.chars().count() > SERVICE_TYPE_MAX {
            return Err(ServiceValidationError::ServiceTypeTooLong {
                max: SERVICE_TYPE_MAX,
            });
        }
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for ServiceType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ServiceType> for String {
    fn from(value: ServiceType) -> Self {
        value.0
    }
}

impl TryFrom<String> for ServiceType {
    type Error = ServiceValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Workflow action attempted on a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Assign,
    Start,
    Complete,
}

impl ServiceAction {
    /// Status a service must be in for the action to apply.
    pub const fn expected_status(self) -> ServiceStatus {
        match self {
            Self::Assign => ServiceStatus::Pending,
            Self::Start => ServiceStatus::Assigned,
            Self::Complete => ServiceStatus::InProgress,
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Assign => "assign",
            Self::Start => "start",
            Self::Complete => "complete",
        })
    }
}

/// Reasons a workflow transition is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action} a service in status {current}; expected {expected}", expected = .action.expected_status())]
    InvalidTransition {
        action: ServiceAction,
        current: ServiceStatus,
    },
    #[error("only the assigned employee may {action} this service")]
    NotAssignedEmployee { action: ServiceAction },
}

impl From<TransitionError> for Error {
    fn from(value: TransitionError) -> Self {
        match value {
            TransitionError::InvalidTransition { .. } => Error::invalid_transition(value.to_string()),
            TransitionError::NotAssignedEmployee { .. } => Error::forbidden(value.to_string()),
        }
    }
}

/// A unit of work requested by a client.
///
/// ## Invariants
/// - `employee_id` is set iff `status` is not [`ServiceStatus::Pending`].
/// - `completed_at` is set iff `status` is [`ServiceStatus::Completed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    id: ServiceId,
    client_id: UserId,
    employee_id: Option<UserId>,
    status: ServiceStatus,
    service_type: ServiceType,
    start_date: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Raw stored fields, validated by [`Service::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceParts {
    pub id: ServiceId,
    pub client_id: UserId,
    pub employee_id: Option<UserId>,
    pub status: ServiceStatus,
    pub service_type: ServiceType,
    pub start_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Service {
    /// A new client request: `PENDING` with no employee.
    pub fn request(
        id: ServiceId,
        client_id: UserId,
        service_type: ServiceType,
        start_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            client_id,
            employee_id: None,
            status: ServiceStatus::Pending,
            service_type,
            start_date,
            completed_at: None,
            created_at,
        }
    }

    /// Rebuild a service from storage, enforcing the status invariants.
    pub fn restore(parts: ServiceParts) -> Result<Self, ServiceValidationError> {
        let ServiceParts {
            id,
            client_id,
            employee_id,
            status,
            service_type,
            start_date,
            completed_at,
            created_at,
        } = parts;

        match (status.requires_employee(), employee_id.is_some()) {
            (true, false) => return Err(ServiceValidationError::MissingEmployee { status }),
            (false, true) => return Err(ServiceValidationError::UnexpectedEmployee),
            _ => {}
        }
        if (status == ServiceStatus::Completed) != completed_at.is_some() {
            return Err(ServiceValidationError::CompletionMismatch);
        }

        Ok(Self {
            id,
            client_id,
            employee_id,
            status,
            service_type,
            start_date,
            completed_at,
            created_at,
        })
    }

    pub fn id(&self) -> ServiceId {
        self.id
    }

    pub fn client_id(&self) -> UserId {
        self.client_id
    }

    pub fn employee_id(&self) -> Option<UserId> {
        self.employee_id
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    pub fn service_type(&self) -> &ServiceType {
        &self.service_type
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` is the employee assigned to this service.
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.employee_id == Some(user)
    }

    /// `PENDING → ASSIGNED`, recording the employee.
    pub fn assign(self, employee: UserId) -> Result<Self, TransitionError> {
        self.expect_status(ServiceAction::Assign)?;
        Ok(Self {
            employee_id: Some(employee),
            status: ServiceStatus::Assigned,
            ..self
        })
    }

    /// `ASSIGNED → IN_PROGRESS`, by the assigned employee only.
    pub fn start(self, caller: UserId) -> Result<Self, TransitionError> {
        self.expect_status(ServiceAction::Start)?;
        self.expect_assignee(ServiceAction::Start, caller)?;
        Ok(Self {
            status: ServiceStatus::InProgress,
            ..self
        })
    }

    /// `IN_PROGRESS → COMPLETED`, by the assigned employee only.
    pub fn complete(self, caller: UserId, now: DateTime<Utc>) -> Result<Self, TransitionError> {
        self.expect_status(ServiceAction::Complete)?;
        self.expect_assignee(ServiceAction::Complete, caller)?;
        Ok(Self {
            status: ServiceStatus::Completed,
            completed_at: Some(now),
            ..self
        })
    }

    fn expect_status(&self, action: ServiceAction) -> Result<(), TransitionError> {
        if self.status == action.expected_status() {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                action,
                current: self.status,
            })
        }
    }

    fn expect_assignee(&self, action: ServiceAction, caller: UserId) -> Result<(), TransitionError> {
        if self.is_assigned_to(caller) {
            Ok(())
        } else {
            Err(TransitionError::NotAssignedEmployee { action })
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
