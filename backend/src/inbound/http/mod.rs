//! HTTP inbound adapter exposing the JSON API and dashboard page models.

pub mod access;
pub mod auth;
pub mod configuration;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod schemas;
pub mod services;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` endpoint on `cfg`.
///
/// Mount under `web::scope("/api")` behind the session middleware. Body and
/// query decode failures answer with the JSON error envelope.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(users::update_profile)
        .service(users::list_users)
        .service(users::available_employees)
        .service(configuration::required_documents)
        .service(configuration::templates)
        .configure(services::configure);
}
