//! User profile and directory endpoints.
//!
//! ```text
//! PATCH /api/users/profile {"name":"Ana","phone":"+34 600 000 000"}
//! GET   /api/users
//! GET   /api/employees/available
//! ```

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProfileUpdate, RequiredRoles, Role, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::api_caller;
use crate::inbound::http::schemas::{EmployeeListResponse, UserBody, UserListResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_body, map_user_validation_error};

/// Partial profile change. A blank `phone` clears the stored number.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileUpdateRequest {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    #[schema(example = "+34 600 000 000")]
    pub phone: Option<String>,
}

/// The caller's own profile as returned after an update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ProfileBody {
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&User> for ProfileBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            phone: user.phone().map(str::to_owned),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileUpdateResponse {
    #[schema(example = "Profile updated")]
    pub message: String,
    pub user: ProfileBody,
}

/// Update the caller's name and/or phone.
#[utoipa::path(
    patch,
    path = "/api/users/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdateResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[patch("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<ProfileUpdateRequest>, actix_web::Error>,
) -> ApiResult<web::Json<ProfileUpdateResponse>> {
    let caller = api_caller(&session, &RequiredRoles::any_authenticated())?;
    let ProfileUpdateRequest { name, phone } = json_body(payload)?;
    let update = ProfileUpdate::try_new(name.as_deref(), phone.as_deref())
        .map_err(|err| map_user_validation_error(&err))?;
    let user = state.directory.update_profile(&caller, update).await?;
    session.refresh_identity(&user.identity())?;
    Ok(web::Json(ProfileUpdateResponse {
        message: "Profile updated".to_owned(),
        user: ProfileBody::from(&user),
    }))
}

/// Every account, ordered by name.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UserListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserListResponse>> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Administrator))?;
    let users = state.directory.list_users(&caller).await?;
    Ok(web::Json(UserListResponse {
        total: users.len(),
        users: users.iter().map(UserBody::from).collect(),
    }))
}

/// Employees that can take an assignment.
#[utoipa::path(
    get,
    path = "/api/employees/available",
    responses(
        (status = 200, description = "Employees", body = EmployeeListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["users"],
    operation_id = "availableEmployees"
)]
#[get("/employees/available")]
pub async fn available_employees(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<EmployeeListResponse>> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Administrator))?;
    let employees = state.directory.available_employees(&caller).await?;
    Ok(web::Json(EmployeeListResponse::from_users(&employees)))
}
