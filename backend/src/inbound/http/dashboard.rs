//! Role dashboards as JSON page models.
//!
//! Pages share the API's access decisions but answer with redirects: no
//! acceptable session sends the browser to [`LOGIN_ROUTE`], and a service
//! the caller cannot see sends them back to their own dashboard.
//!
//! [`LOGIN_ROUTE`]: crate::inbound::http::access::LOGIN_ROUTE

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ErrorCode, Identity, RequiredRoles, Role, ServiceView};
use crate::inbound::http::access::{PageError, dashboard_home, page_caller};
use crate::inbound::http::schemas::{ServiceBody, ServiceDetailResponse, UserBody};
use crate::inbound::http::services::parse_service_id;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

type PageResult<T> = Result<web::Json<T>, PageError>;

/// Landing page for administrators.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminHomePage {
    pub user: Identity,
    pub pending: Vec<ServiceBody>,
    pub employees: Vec<UserBody>,
}

/// A titled list of services.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceListPage {
    pub user: Identity,
    pub services: Vec<ServiceBody>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceDetailPage {
    pub user: Identity,
    pub service: ServiceDetailResponse,
}

async fn list_page(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
    view: ServiceView,
) -> PageResult<ServiceListPage> {
    let user = page_caller(session, &RequiredRoles::only(role))?;
    let services = state.services_query.list(&user, view).await?;
    Ok(web::Json(ServiceListPage {
        total: services.len(),
        services: services.iter().map(ServiceBody::from).collect(),
        user,
    }))
}

async fn detail_page(
    state: &HttpState,
    session: &SessionContext,
    role: Role,
    raw_id: &str,
) -> PageResult<ServiceDetailPage> {
    let user = page_caller(session, &RequiredRoles::only(role))?;
    let home = PageError::redirect(dashboard_home(role));
    let Ok(service_id) = parse_service_id(raw_id) else {
        return Err(home);
    };
    match state.services_query.detail(&user, service_id).await {
        Ok(detail) => Ok(web::Json(ServiceDetailPage {
            user,
            service: ServiceDetailResponse::from(detail),
        })),
        Err(error) if error.code() == ErrorCode::NotFound => Err(home),
        Err(error) => Err(PageError::from(error)),
    }
}

/// Pending requests next to the employees who could take them.
#[utoipa::path(
    get,
    path = "/dashboard/admin",
    responses(
        (status = 200, description = "Administrator home", body = AdminHomePage),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["dashboard"],
    operation_id = "adminDashboard"
)]
#[get("/admin")]
pub async fn admin_home(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<AdminHomePage> {
    let user = page_caller(&session, &RequiredRoles::only(Role::Administrator))?;
    let pending = state.services_query.list(&user, ServiceView::Pending).await?;
    let employees = state.directory.available_employees(&user).await?;
    Ok(web::Json(AdminHomePage {
        user,
        pending: pending.iter().map(ServiceBody::from).collect(),
        employees: employees.iter().map(UserBody::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/dashboard/admin/completed",
    responses(
        (status = 200, description = "Completed services", body = ServiceListPage),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["dashboard"],
    operation_id = "adminCompletedDashboard"
)]
#[get("/admin/completed")]
pub async fn admin_completed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<ServiceListPage> {
    list_page(&state, &session, Role::Administrator, ServiceView::Completed).await
}

#[utoipa::path(
    get,
    path = "/dashboard/employee/assigned",
    responses(
        (status = 200, description = "Assigned services", body = ServiceListPage),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["dashboard"],
    operation_id = "employeeAssignedDashboard"
)]
#[get("/employee/assigned")]
pub async fn employee_assigned(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<ServiceListPage> {
    list_page(&state, &session, Role::Employee, ServiceView::Assigned).await
}

#[utoipa::path(
    get,
    path = "/dashboard/employee/in-progress",
    responses(
        (status = 200, description = "Services in progress", body = ServiceListPage),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["dashboard"],
    operation_id = "employeeInProgressDashboard"
)]
#[get("/employee/in-progress")]
pub async fn employee_in_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<ServiceListPage> {
    list_page(&state, &session, Role::Employee, ServiceView::InProgress).await
}

#[utoipa::path(
    get,
    path = "/dashboard/employee/completed",
    responses(
        (status = 200, description = "Services the employee completed", body = ServiceListPage),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["dashboard"],
    operation_id = "employeeCompletedDashboard"
)]
#[get("/employee/completed")]
pub async fn employee_completed(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<ServiceListPage> {
    list_page(&state, &session, Role::Employee, ServiceView::Completed).await
}

#[utoipa::path(
    get,
    path = "/dashboard/client",
    responses(
        (status = 200, description = "The client's services", body = ServiceListPage),
        (status = 303, description = "Redirect to login")
    ),
    tags = ["dashboard"],
    operation_id = "clientDashboard"
)]
#[get("/client")]
pub async fn client_home(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<ServiceListPage> {
    list_page(&state, &session, Role::Client, ServiceView::Mine).await
}

/// Service detail as seen by an administrator.
#[utoipa::path(
    get,
    path = "/dashboard/admin/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service detail", body = ServiceDetailPage),
        (status = 303, description = "Redirect to login or to the dashboard home")
    ),
    tags = ["dashboard"],
    operation_id = "adminServiceDetail"
)]
#[get("/admin/services/{id}")]
pub async fn admin_service_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<ServiceDetailPage> {
    detail_page(&state, &session, Role::Administrator, &path).await
}

/// Service detail for the employee it is assigned to.
#[utoipa::path(
    get,
    path = "/dashboard/employee/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service detail", body = ServiceDetailPage),
        (status = 303, description = "Redirect to login or to the dashboard home")
    ),
    tags = ["dashboard"],
    operation_id = "employeeServiceDetail"
)]
#[get("/employee/services/{id}")]
pub async fn employee_service_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<ServiceDetailPage> {
    detail_page(&state, &session, Role::Employee, &path).await
}

/// Service detail for the client who requested it.
#[utoipa::path(
    get,
    path = "/dashboard/client/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service detail", body = ServiceDetailPage),
        (status = 303, description = "Redirect to login or to the dashboard home")
    ),
    tags = ["dashboard"],
    operation_id = "clientServiceDetail"
)]
#[get("/client/services/{id}")]
pub async fn client_service_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<ServiceDetailPage> {
    detail_page(&state, &session, Role::Client, &path).await
}

/// Register every dashboard page on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_home)
        .service(admin_completed)
        .service(admin_service_detail)
        .service(employee_assigned)
        .service(employee_in_progress)
        .service(employee_completed)
        .service(employee_service_detail)
        .service(client_home)
        .service(client_service_detail);
}
