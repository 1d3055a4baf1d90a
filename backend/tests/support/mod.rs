//! In-process harness: the production wiring over a seeded in-memory store.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap, LOCATION, SET_COOKIE};
use actix_web::{App, test, web};
use mockable::Clock;
use serde_json::{Value, json};
use uuid::Uuid;

use service_desk::Trace;
use service_desk::demo_data::DemoData;
use service_desk::domain::{
    ConfigurationService, DEFAULT_SHARED_PASSWORD, DirectoryLoginService, RequirementsCatalogue,
    ServiceDeskService, UserDirectoryService,
};
use service_desk::inbound::http::state::{HttpState, HttpStatePorts};
use service_desk::inbound::http::{api_routes, dashboard};
use service_desk::outbound::memory::MemoryStore;
use service_desk::test_support::MutableClock;

pub use service_desk::demo_data::{
    DEMO_ADMIN_ID, DEMO_CLIENT_ID, DEMO_EMPLOYEE_ID, DEMO_SECOND_EMPLOYEE_ID,
};

pub const ADMIN: &str = "admin@example.com";
pub const EMPLOYEE: &str = "employee@example.com";
pub const SECOND_EMPLOYEE: &str = "employee2@example.com";
pub const CLIENT: &str = "client@example.com";

pub const PENDING_SERVICE: u128 = 1;
pub const ASSIGNED_SERVICE: u128 = 2;
pub const IN_PROGRESS_SERVICE: u128 = 3;
pub const COMPLETED_SERVICE: u128 = 4;

/// Id of the demo service numbered `n`.
pub fn demo_service(n: u128) -> String {
    Uuid::from_u128(0x5e7_0000 + n).to_string()
}

/// Store and clock behind one test app.
pub struct Desk {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<MutableClock>,
}

impl Desk {
    /// The demo data set, seeded at the fixture epoch.
    pub fn seeded() -> Self {
        let clock = Arc::new(MutableClock::at_fixture_epoch());
        let store = Arc::new(MemoryStore::new());
        store
            .seed(DemoData::build(clock.utc()).expect("demo data builds"))
            .expect("seed memory store");
        Self { store, clock }
    }

    fn state(&self) -> HttpState {
        let desk = Arc::new(ServiceDeskService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
        ));
        HttpState::new(HttpStatePorts {
            login: Arc::new(DirectoryLoginService::new(
                self.store.clone(),
                DEFAULT_SHARED_PASSWORD,
            )),
            services: desk.clone(),
            services_query: desk,
            directory: Arc::new(UserDirectoryService::new(self.store.clone())),
            configuration: Arc::new(ConfigurationService::new(
                Arc::new(RequirementsCatalogue::default()),
                self.store.clone(),
            )),
        })
    }

    /// `/api` and `/dashboard` scopes wired as the server wires them.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let key = Key::generate();
        App::new()
            .app_data(web::Data::new(self.state()))
            .wrap(Trace)
            .service(
                web::scope("/api")
                    .wrap(session_middleware(key.clone()))
                    .configure(api_routes),
            )
            .service(
                web::scope("/dashboard")
                    .wrap(session_middleware(key))
                    .configure(dashboard::configure),
            )
    }
}

fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .build()
}

/// Status, headers, and decoded JSON body (`Null` when empty).
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn error_code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }

    /// The session cookie this reply set, if the session changed.
    pub fn session_cookie(&self) -> Option<Cookie<'static>> {
        self.headers
            .get_all(SET_COOKIE)
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| Cookie::parse_encoded(value.to_owned()).ok())
            .find(|cookie| cookie.name() == "session")
    }
}

pub async fn send<S, B>(app: &S, request: test::TestRequest, cookie: Option<&Cookie<'static>>) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub async fn get<S, B>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::get().uri(uri), cookie).await
}

pub async fn post<S, B>(
    app: &S,
    uri: &str,
    body: Value,
    cookie: Option<&Cookie<'static>>,
) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(app, test::TestRequest::post().uri(uri).set_json(body), cookie).await
}

/// Log in as `email` with the shared password and return the session cookie.
pub async fn login<S, B>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": DEFAULT_SHARED_PASSWORD }))
        .to_request();
    let res = test::call_service(app, request).await;
    assert_eq!(res.status(), StatusCode::OK, "login as {email}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
