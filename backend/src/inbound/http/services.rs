//! Service request lifecycle endpoints.
//!
//! ```text
//! POST /api/services {"serviceType":"installation","startDate":"2026-02-01T09:00:00Z"}
//! GET  /api/services/{pending|completed|mine|assigned|in-progress}
//! GET  /api/services/{id}
//! POST /api/services/{id}/{assign|start|complete}
//! POST /api/services/{id}/{documents|inspections|evidences}
//! ```
//!
//! Every handler resolves the caller through the access policy, validates
//! the request, and only then reaches a port. Fixed list paths are mounted
//! before `/services/{id}` so they are matched first.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NewServiceRequest;
use crate::domain::{
    Document, Error, Evidence, Identity, Inspection, RecordDraft, RequiredRoles, Role,
    ServiceId, ServiceRecord, ServiceType, ServiceView, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::api_caller;
use crate::inbound::http::schemas::{ServiceBody, ServiceDetailResponse, ServiceListResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, json_body, map_record_validation_error, map_service_type_error,
    parse_rfc3339_timestamp, parse_uuid, require_text,
};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[schema(example = "installation")]
    pub service_type: Option<String>,
    #[schema(example = "2026-02-01T09:00:00Z")]
    pub start_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignServiceRequest {
    #[schema(format = Uuid)]
    pub employee_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DocumentRequest {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct InspectionRequest {
    pub notes: Option<String>,
    pub result: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EvidenceRequest {
    pub description: Option<String>,
    pub url: Option<String>,
}

pub(crate) fn parse_service_id(raw: &str) -> Result<ServiceId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(ServiceId::from_uuid)
}

/// Register every service route on `cfg` in match order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_service)
        .service(pending_services)
        .service(completed_services)
        .service(my_services)
        .service(assigned_services)
        .service(in_progress_services)
        .service(service_detail)
        .service(assign_service)
        .service(start_service)
        .service(complete_service)
        .service(add_document)
        .service(add_inspection)
        .service(add_evidence);
}

async fn list_view(
    state: &HttpState,
    session: &SessionContext,
    required: &RequiredRoles,
    view: ServiceView,
) -> ApiResult<web::Json<ServiceListResponse>> {
    let caller = api_caller(session, required)?;
    let services = state.services_query.list(&caller, view).await?;
    Ok(web::Json(ServiceListResponse::from_services(&services)))
}

/// A client asks for new work.
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service requested", body = ServiceBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["services"],
    operation_id = "requestService"
)]
#[post("/services")]
pub async fn create_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<CreateServiceRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Client))?;
    let CreateServiceRequest {
        service_type,
        start_date,
    } = json_body(payload)?;
    let service_type = require_text(service_type, FieldName::new("serviceType"))?;
    let service_type = ServiceType::new(&service_type).map_err(|err| map_service_type_error(&err))?;
    let start_date = require_text(start_date, FieldName::new("startDate"))?;
    let start_date = parse_rfc3339_timestamp(&start_date, FieldName::new("startDate"))?;

    let service = state
        .services
        .request_service(
            &caller,
            NewServiceRequest {
                service_type,
                start_date,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(ServiceBody::from(&service)))
}

/// Unassigned requests, earliest start first.
#[utoipa::path(
    get,
    path = "/api/services/pending",
    responses(
        (status = 200, description = "Pending services", body = ServiceListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["services"],
    operation_id = "pendingServices"
)]
#[get("/services/pending")]
pub async fn pending_services(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ServiceListResponse>> {
    list_view(
        &state,
        &session,
        &RequiredRoles::only(Role::Administrator),
        ServiceView::Pending,
    )
    .await
}

/// The 50 most recently completed services visible to the caller.
#[utoipa::path(
    get,
    path = "/api/services/completed",
    responses(
        (status = 200, description = "Completed services", body = ServiceListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["services"],
    operation_id = "completedServices"
)]
#[get("/services/completed")]
pub async fn completed_services(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ServiceListResponse>> {
    list_view(
        &state,
        &session,
        &RequiredRoles::any_of([Role::Administrator, Role::Employee]),
        ServiceView::Completed,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/api/services/mine",
    responses(
        (status = 200, description = "The client's services", body = ServiceListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["services"],
    operation_id = "myServices"
)]
#[get("/services/mine")]
pub async fn my_services(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ServiceListResponse>> {
    list_view(
        &state,
        &session,
        &RequiredRoles::only(Role::Client),
        ServiceView::Mine,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/api/services/assigned",
    responses(
        (status = 200, description = "Services assigned to the caller", body = ServiceListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["services"],
    operation_id = "assignedServices"
)]
#[get("/services/assigned")]
pub async fn assigned_services(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ServiceListResponse>> {
    list_view(
        &state,
        &session,
        &RequiredRoles::only(Role::Employee),
        ServiceView::Assigned,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/api/services/in-progress",
    responses(
        (status = 200, description = "The caller's services in progress", body = ServiceListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["services"],
    operation_id = "inProgressServices"
)]
#[get("/services/in-progress")]
pub async fn in_progress_services(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ServiceListResponse>> {
    list_view(
        &state,
        &session,
        &RequiredRoles::only(Role::Employee),
        ServiceView::InProgress,
    )
    .await
}

/// One service with its documents, inspections, and evidences.
///
/// Services the caller may not see answer `404` like missing ones.
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service detail", body = ServiceDetailResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["services"],
    operation_id = "serviceDetail"
)]
#[get("/services/{id}")]
pub async fn service_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceDetailResponse>> {
    let caller = api_caller(&session, &RequiredRoles::any_authenticated())?;
    let service_id = parse_service_id(&path)?;
    let detail = state.services_query.detail(&caller, service_id).await?;
    Ok(web::Json(ServiceDetailResponse::from(detail)))
}

/// Hand a pending service to an employee.
#[utoipa::path(
    post,
    path = "/api/services/{id}/assign",
    params(("id" = String, Path, description = "Service id")),
    request_body = AssignServiceRequest,
    responses(
        (status = 200, description = "Service assigned", body = ServiceBody),
        (status = 400, description = "Invalid request or target is not an employee", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Service is not pending", body = Error)
    ),
    tags = ["services"],
    operation_id = "assignService"
)]
#[post("/services/{id}/assign")]
pub async fn assign_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<AssignServiceRequest>, actix_web::Error>,
) -> ApiResult<web::Json<ServiceBody>> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Administrator))?;
    let service_id = parse_service_id(&path)?;
    let employee_field = FieldName::new("employeeId");
    let employee_id = require_text(json_body(payload)?.employee_id, employee_field)?;
    let employee_id = UserId::from_uuid(parse_uuid(&employee_id, employee_field)?);

    let service = state
        .services
        .assign(&caller, service_id, employee_id)
        .await?;
    Ok(web::Json(ServiceBody::from(&service)))
}

/// The assigned employee starts work.
#[utoipa::path(
    post,
    path = "/api/services/{id}/start",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service in progress", body = ServiceBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Service is not assigned", body = Error)
    ),
    tags = ["services"],
    operation_id = "startService"
)]
#[post("/services/{id}/start")]
pub async fn start_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceBody>> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Employee))?;
    let service_id = parse_service_id(&path)?;
    let service = state.services.start(&caller, service_id).await?;
    Ok(web::Json(ServiceBody::from(&service)))
}

/// The assigned employee finishes work.
#[utoipa::path(
    post,
    path = "/api/services/{id}/complete",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service completed", body = ServiceBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Service is not in progress", body = Error)
    ),
    tags = ["services"],
    operation_id = "completeService"
)]
#[post("/services/{id}/complete")]
pub async fn complete_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceBody>> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Employee))?;
    let service_id = parse_service_id(&path)?;
    let service = state.services.complete(&caller, service_id).await?;
    Ok(web::Json(ServiceBody::from(&service)))
}

async fn file_record(
    state: &HttpState,
    caller: &Identity,
    raw_id: &str,
    draft: RecordDraft,
) -> ApiResult<HttpResponse> {
    let service_id = parse_service_id(raw_id)?;
    let record = state.services.add_record(caller, service_id, draft).await?;
    let response = match record {
        ServiceRecord::Document(document) => HttpResponse::Created().json(document),
        ServiceRecord::Inspection(inspection) => HttpResponse::Created().json(inspection),
        ServiceRecord::Evidence(evidence) => HttpResponse::Created().json(evidence),
    };
    Ok(response)
}

fn record_field(value: Option<String>, field: &'static str) -> Result<String, Error> {
    require_text(value, FieldName::new(field))
}

/// Attach a document to a service in progress.
#[utoipa::path(
    post,
    path = "/api/services/{id}/documents",
    params(("id" = String, Path, description = "Service id")),
    request_body = DocumentRequest,
    responses(
        (status = 201, description = "Document filed", body = Document),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Service is not in progress", body = Error)
    ),
    tags = ["records"],
    operation_id = "addDocument"
)]
#[post("/services/{id}/documents")]
pub async fn add_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<DocumentRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Employee))?;
    let DocumentRequest { name, url } = json_body(payload)?;
    let draft = RecordDraft::document(&record_field(name, "name")?, &record_field(url, "url")?)
        .map_err(|err| map_record_validation_error(&err))?;
    file_record(&state, &caller, &path, draft).await
}

/// Record an inspection on a service in progress.
#[utoipa::path(
    post,
    path = "/api/services/{id}/inspections",
    params(("id" = String, Path, description = "Service id")),
    request_body = InspectionRequest,
    responses(
        (status = 201, description = "Inspection filed", body = Inspection),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Service is not in progress", body = Error)
    ),
    tags = ["records"],
    operation_id = "addInspection"
)]
#[post("/services/{id}/inspections")]
pub async fn add_inspection(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<InspectionRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Employee))?;
    let InspectionRequest { notes, result } = json_body(payload)?;
    let draft = RecordDraft::inspection(
        &record_field(notes, "notes")?,
        &record_field(result, "result")?,
    )
    .map_err(|err| map_record_validation_error(&err))?;
    file_record(&state, &caller, &path, draft).await
}

/// Attach evidence to a service in progress.
#[utoipa::path(
    post,
    path = "/api/services/{id}/evidences",
    params(("id" = String, Path, description = "Service id")),
    request_body = EvidenceRequest,
    responses(
        (status = 201, description = "Evidence filed", body = Evidence),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Service is not in progress", body = Error)
    ),
    tags = ["records"],
    operation_id = "addEvidence"
)]
#[post("/services/{id}/evidences")]
pub async fn add_evidence(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: Result<web::Json<EvidenceRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Employee))?;
    let EvidenceRequest { description, url } = json_body(payload)?;
    let draft = RecordDraft::evidence(
        &record_field(description, "description")?,
        &record_field(url, "url")?,
    )
    .map_err(|err| map_record_validation_error(&err))?;
    file_record(&state, &caller, &path, draft).await
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod tests;
