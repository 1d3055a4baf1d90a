//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};
use std::sync::Arc;

use crate::domain::ports::{
    MockConfigurationQuery, MockLoginService, MockServiceDeskCommand, MockServiceDeskQuery,
    MockUserDirectory,
};
use crate::domain::{Error, Identity};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Route that test apps expose to plant an identity in the session.
pub const TEST_LOGIN_ROUTE: &str = "/__test/login";

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
///
/// # Panics
/// When the response did not set a session cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// HTTP state whose ports are strict mocks (any call panics) unless
/// `configure` swaps one in.
pub fn state_with(configure: impl FnOnce(&mut HttpStatePorts)) -> HttpState {
    let mut ports = HttpStatePorts {
        login: Arc::new(MockLoginService::new()),
        services: Arc::new(MockServiceDeskCommand::new()),
        services_query: Arc::new(MockServiceDeskQuery::new()),
        directory: Arc::new(MockUserDirectory::new()),
        configuration: Arc::new(MockConfigurationQuery::new()),
    };
    configure(&mut ports);
    HttpState::new(ports)
}

/// App carrying `state`, the test session middleware, and a
/// [`TEST_LOGIN_ROUTE`] that signs `caller` in when present.
pub fn test_app(
    state: HttpState,
    caller: Option<Identity>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route(
            TEST_LOGIN_ROUTE,
            web::post().to(move |session: SessionContext| {
                let caller = caller.clone();
                async move {
                    if let Some(identity) = caller {
                        session.persist_identity(&identity)?;
                    }
                    Ok::<_, Error>(HttpResponse::NoContent().finish())
                }
            }),
        )
}

/// Hit [`TEST_LOGIN_ROUTE`] and return the session cookie it set.
pub async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(app, test::TestRequest::post().uri(TEST_LOGIN_ROUTE).to_request())
        .await;
    session_cookie(&res)
}
