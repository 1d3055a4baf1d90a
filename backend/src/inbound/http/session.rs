//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The identity snapshot taken at login is the only thing stored in the
//! cookie session. Handlers read it back through [`SessionContext`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `identity` in the session cookie, rotating the session id.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Replace the stored identity after the account changed, keeping the
    /// session id.
    pub fn refresh_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to refresh session: {error}")))
    }

    /// The identity in the session, if any.
    ///
    /// A value that no longer decodes as an [`Identity`] is treated as absent
    /// and the session is cleared.
    pub fn identity(&self) -> Option<Identity> {
        match self.0.get::<Identity>(IDENTITY_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding undecodable identity in session cookie");
                self.0.purge();
                None
            }
        }
    }

    /// Drop everything from the session.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use crate::test_support::identity;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/whoami",
                web::get().to(|session: SessionContext| async move {
                    match session.identity() {
                        Some(identity) => HttpResponse::Ok().json(identity),
                        None => HttpResponse::Unauthorized().finish(),
                    }
                }),
            )
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session
                        .insert(IDENTITY_KEY, "not-an-identity")
                        .expect("insert raw value");
                    HttpResponse::Ok().finish()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_identity() {
        let caller = identity(Role::Employee);
        let expected = caller.clone();
        let app = test::init_service(session_test_app().route(
            "/login",
            web::get().to(move |session: SessionContext| {
                let caller = caller.clone();
                async move {
                    session.persist_identity(&caller)?;
                    Ok::<_, Error>(HttpResponse::Ok().finish())
                }
            }),
        ))
        .await;

        let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request())
            .await;
        let cookie = session_cookie(&login);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Identity = test::read_body_json(res).await;
        assert_eq!(body, expected);
    }

    #[actix_web::test]
    async fn missing_identity_is_absent() {
        let app = test::init_service(session_test_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_identity_is_absent() {
        let app = test::init_service(session_test_app()).await;
        let tamper =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let cookie = session_cookie(&tamper);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
