//! Response bodies shared by the API and dashboard handlers.
//!
//! Entities such as [`Service`] and [`User`] keep their fields private and do
//! not derive `Serialize`; these wrappers fix the wire shape (camelCase,
//! RFC 3339 UTC timestamps) and carry the OpenAPI schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ServiceDetail;
use crate::domain::{
    Document, DocumentTemplate, Evidence, Inspection, Role, Service, ServiceStatus, User,
};

/// A service as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBody {
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    #[schema(value_type = String, format = Uuid)]
    pub client_id: String,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub employee_id: Option<String>,
    pub status: ServiceStatus,
    #[schema(example = "installation")]
    pub service_type: String,
    pub start_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Service> for ServiceBody {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id().to_string(),
            client_id: service.client_id().to_string(),
            employee_id: service.employee_id().map(|id| id.to_string()),
            status: service.status(),
            service_type: service.service_type().to_string(),
            start_date: service.start_date(),
            completed_at: service.completed_at(),
            created_at: service.created_at(),
        }
    }
}

/// `{services, total}` list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceListResponse {
    pub services: Vec<ServiceBody>,
    pub total: usize,
}

impl ServiceListResponse {
    pub fn from_services(services: &[Service]) -> Self {
        Self {
            services: services.iter().map(ServiceBody::from).collect(),
            total: services.len(),
        }
    }
}

/// A service together with every record filed against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetailResponse {
    #[serde(flatten)]
    pub service: ServiceBody,
    pub documents: Vec<Document>,
    pub inspections: Vec<Inspection>,
    pub evidences: Vec<Evidence>,
}

impl From<ServiceDetail> for ServiceDetailResponse {
    fn from(detail: ServiceDetail) -> Self {
        let ServiceDetail { service, records } = detail;
        Self {
            service: ServiceBody::from(&service),
            documents: records.documents,
            inspections: records.inspections,
            evidences: records.evidences,
        }
    }
}

/// An account as listed to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    pub role: Role,
    #[schema(example = "Elena Empleada")]
    pub name: String,
    #[schema(example = "employee@example.com")]
    pub email: String,
    pub phone: Option<String>,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            role: user.role(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            phone: user.phone().map(str::to_owned),
        }
    }
}

/// `{users, total}` list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserBody>,
    pub total: usize,
}

/// `{employees, total}` list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    pub employees: Vec<UserBody>,
    pub total: usize,
}

impl EmployeeListResponse {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            employees: users.iter().map(UserBody::from).collect(),
            total: users.len(),
        }
    }
}

/// `{templates}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TemplateListResponse {
    pub templates: Vec<DocumentTemplate>,
}
