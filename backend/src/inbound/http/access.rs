//! HTTP adapters over the access policy.
//!
//! Both adapters run the same [`authorize`] decision on the session identity.
//! API routes turn a denial into a JSON `401`/`403`; dashboard pages answer
//! `303 See Other` to the login route.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, ResponseError};
use tracing::debug;

use crate::domain::access::authorize;
use crate::domain::{Error, Identity, RequiredRoles, Role};

use super::session::SessionContext;

/// Where dashboard pages send callers without an acceptable session.
pub const LOGIN_ROUTE: &str = "/login";

/// Resolve the caller for an API route.
pub(crate) fn api_caller(
    session: &SessionContext,
    required: &RequiredRoles,
) -> Result<Identity, Error> {
    let identity = session.identity();
    authorize(identity.as_ref(), required)
        .cloned()
        .map_err(|denial| {
            debug!(%denial, "api access denied");
            Error::from(denial)
        })
}

/// Resolve the caller for a dashboard page.
pub(crate) fn page_caller(
    session: &SessionContext,
    required: &RequiredRoles,
) -> Result<Identity, PageError> {
    let identity = session.identity();
    authorize(identity.as_ref(), required)
        .cloned()
        .map_err(|denial| {
            debug!(%denial, "page access denied");
            PageError::redirect(LOGIN_ROUTE)
        })
}

/// Dashboard root for `role`; the redirect target for hidden services.
pub const fn dashboard_home(role: Role) -> &'static str {
    match role {
        Role::Administrator => "/dashboard/admin",
        Role::Employee => "/dashboard/employee/assigned",
        Role::Client => "/dashboard/client",
    }
}

/// Failure mode of a dashboard page.
#[derive(Debug)]
pub enum PageError {
    /// Send the browser elsewhere with `303 See Other`.
    Redirect(&'static str),
    /// Anything else is reported like an API error.
    Failed(Error),
}

impl PageError {
    pub const fn redirect(location: &'static str) -> Self {
        Self::Redirect(location)
    }
}

impl From<Error> for PageError {
    fn from(value: Error) -> Self {
        Self::Failed(value)
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redirect(location) => write!(f, "redirect to {location}"),
            Self::Failed(error) => write!(f, "{}", error.message()),
        }
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Redirect(_) => StatusCode::SEE_OTHER,
            Self::Failed(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Redirect(location) => HttpResponse::SeeOther()
                .insert_header((LOCATION, *location))
                .finish(),
            Self::Failed(error) => error.error_response(),
        }
    }
}
