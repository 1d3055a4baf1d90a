//! Login, logout, and session inspection.
//!
//! ```text
//! POST /api/auth/login {"email":"admin@example.com","password":"password"}
//! POST /api/auth/logout
//! GET  /api/auth/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, Identity, LoginCredentials, RequiredRoles};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::api_caller;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_body, map_login_validation_error};

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

/// `{user}` envelope returned by login and session lookups.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: Identity,
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<LoginRequest>, actix_web::Error>,
) -> ApiResult<web::Json<SessionResponse>> {
    let LoginRequest { email, password } = json_body(payload)?;
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(|err| map_login_validation_error(&err))?;
    let identity = state.login.authenticate(&credentials).await?;
    session.persist_identity(&identity)?;
    info!(user_id = %identity.id, role = %identity.role, "login succeeded");
    Ok(web::Json(SessionResponse { user: identity }))
}

/// End the session. Always succeeds.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// The identity captured at login.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current identity", body = SessionResponse),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/auth/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionResponse>> {
    let user = api_caller(&session, &RequiredRoles::any_authenticated())?;
    Ok(web::Json(SessionResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockLoginService;
    use crate::inbound::http::test_utils::{session_cookie, state_with, test_session_middleware};
    use crate::test_support::identity;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn app(
        login_service: MockLoginService,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = state_with(|ports| ports.login = std::sync::Arc::new(login_service));
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api")
                    .service(login)
                    .service(logout)
                    .service(current_session),
            )
    }

    #[rstest]
    #[actix_web::test]
    async fn login_stores_the_identity_in_the_session() {
        let admin = identity(crate::domain::Role::Administrator);
        let returned = admin.clone();
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .withf(|creds| creds.email() == "admin@example.com" && creds.password() == "password")
            .times(1)
            .return_once(move |_| Ok(returned));
        let app = test::init_service(app(service)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": " Admin@Example.com ", "password": "password"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["user"]["role"], "ADMINISTRADOR");

        let session = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(session.status(), StatusCode::OK);
        let body: SessionResponse = test::read_body_json(session).await;
        assert_eq!(body.user, admin);
    }

    #[rstest]
    #[case(json!({"email": "nope", "password": "password"}), "email")]
    #[case(json!({"email": "admin@example.com", "password": ""}), "password")]
    #[actix_web::test]
    async fn malformed_credentials_never_reach_the_port(
        #[case] payload: Value,
        #[case] field: &str,
    ) {
        let mut service = MockLoginService::new();
        service.expect_authenticate().never();
        let app = test::init_service(app(service)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_credentials_are_unauthorised() {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));
        let app = test::init_service(app(service)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": "admin@example.com", "password": "wrong"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().all(|c| c.name() != "session"));
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_clears_the_session() {
        let admin = identity(crate::domain::Role::Administrator);
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .return_once(move |_| Ok(admin));
        let app = test::init_service(app(service)).await;

        let login_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"email": "admin@example.com", "password": "password"}))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&login_res);

        let logout_res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&logout_res);

        let session = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/session")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(session.status(), StatusCode::UNAUTHORIZED);
    }
}
