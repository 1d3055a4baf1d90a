//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api`, `/dashboard`, and health endpoint with
//! the wire schemas from [`crate::inbound::http::schemas`] and the domain
//! types that serialise directly. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Document, DocumentTemplate, Error, ErrorCode, Evidence, Identity, Inspection, Role,
    ServiceStatus,
};
use crate::inbound::http::auth::{LoginRequest, SessionResponse};
use crate::inbound::http::configuration::RequiredDocumentsResponse;
use crate::inbound::http::dashboard::{AdminHomePage, ServiceDetailPage, ServiceListPage};
use crate::inbound::http::schemas::{
    EmployeeListResponse, ServiceBody, ServiceDetailResponse, ServiceListResponse,
    TemplateListResponse, UserBody, UserListResponse,
};
use crate::inbound::http::services::{
    AssignServiceRequest, CreateServiceRequest, DocumentRequest, EvidenceRequest,
    InspectionRequest,
};
use crate::inbound::http::users::{ProfileBody, ProfileUpdateRequest, ProfileUpdateResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the service desk.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Service desk API",
        description = "Role-gated service requests: clients ask, administrators assign, employees deliver."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::available_employees,
        crate::inbound::http::configuration::required_documents,
        crate::inbound::http::configuration::templates,
        crate::inbound::http::services::create_service,
        crate::inbound::http::services::pending_services,
        crate::inbound::http::services::completed_services,
        crate::inbound::http::services::my_services,
        crate::inbound::http::services::assigned_services,
        crate::inbound::http::services::in_progress_services,
        crate::inbound::http::services::service_detail,
        crate::inbound::http::services::assign_service,
        crate::inbound::http::services::start_service,
        crate::inbound::http::services::complete_service,
        crate::inbound::http::services::add_document,
        crate::inbound::http::services::add_inspection,
        crate::inbound::http::services::add_evidence,
        crate::inbound::http::dashboard::admin_home,
        crate::inbound::http::dashboard::admin_completed,
        crate::inbound::http::dashboard::employee_assigned,
        crate::inbound::http::dashboard::employee_in_progress,
        crate::inbound::http::dashboard::employee_completed,
        crate::inbound::http::dashboard::client_home,
        crate::inbound::http::dashboard::admin_service_detail,
        crate::inbound::http::dashboard::employee_service_detail,
        crate::inbound::http::dashboard::client_service_detail,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        Role,
        ServiceStatus,
        Document,
        Inspection,
        Evidence,
        DocumentTemplate,
        LoginRequest,
        SessionResponse,
        ProfileUpdateRequest,
        ProfileUpdateResponse,
        ProfileBody,
        UserBody,
        UserListResponse,
        EmployeeListResponse,
        RequiredDocumentsResponse,
        TemplateListResponse,
        CreateServiceRequest,
        AssignServiceRequest,
        DocumentRequest,
        InspectionRequest,
        EvidenceRequest,
        ServiceBody,
        ServiceListResponse,
        ServiceDetailResponse,
        AdminHomePage,
        ServiceListPage,
        ServiceDetailPage,
    )),
    tags(
        (name = "auth", description = "Login and session inspection"),
        (name = "users", description = "Profiles and the staff directory"),
        (name = "configuration", description = "Required documents and templates"),
        (name = "services", description = "Service request lifecycle"),
        (name = "records", description = "Documents, inspections, and evidences"),
        (name = "dashboard", description = "Role dashboards as page models"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
