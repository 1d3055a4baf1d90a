//! Service configuration reads: required documents and templates.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, RequiredRoles, Requirements, Role, ServiceType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::access::api_caller;
use crate::inbound::http::schemas::TemplateListResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_service_type_error, query_params, require_text,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RequiredDocumentsQuery {
    /// Service type to look up, e.g. `installation`.
    pub service_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequiredDocumentsResponse {
    pub service_type: String,
    pub required_documents: Vec<String>,
    pub required_inspections: Vec<String>,
    pub total_required: usize,
}

impl RequiredDocumentsResponse {
    fn new(service_type: &ServiceType, requirements: Requirements) -> Self {
        Self {
            service_type: service_type.to_string(),
            total_required: requirements.total_required(),
            required_documents: requirements.required_documents,
            required_inspections: requirements.required_inspections,
        }
    }
}

/// Documents and inspections a service type needs before completion.
///
/// Unknown service types have no requirements. `serviceType` is trimmed
/// the same way it is when a service is requested, and the response echoes
/// the trimmed value.
#[utoipa::path(
    get,
    path = "/api/configuration/required-documents",
    params(RequiredDocumentsQuery),
    responses(
        (status = 200, description = "Requirements", body = RequiredDocumentsResponse),
        (status = 400, description = "Missing serviceType", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["configuration"],
    operation_id = "requiredDocuments"
)]
#[get("/configuration/required-documents")]
pub async fn required_documents(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: Result<web::Query<RequiredDocumentsQuery>, actix_web::Error>,
) -> ApiResult<web::Json<RequiredDocumentsResponse>> {
    api_caller(&session, &RequiredRoles::any_authenticated())?;
    let raw = require_text(
        query_params(query)?.service_type,
        FieldName::new("serviceType"),
    )?;
    let service_type = ServiceType::new(&raw).map_err(|err| map_service_type_error(&err))?;
    let requirements = state.configuration.required_documents(&service_type).await?;
    Ok(web::Json(RequiredDocumentsResponse::new(
        &service_type,
        requirements,
    )))
}

/// Document templates maintained by administrators.
#[utoipa::path(
    get,
    path = "/api/configuration/templates",
    responses(
        (status = 200, description = "Templates", body = TemplateListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["configuration"],
    operation_id = "listTemplates"
)]
#[get("/configuration/templates")]
pub async fn templates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TemplateListResponse>> {
    let caller = api_caller(&session, &RequiredRoles::only(Role::Administrator))?;
    let templates = state.configuration.templates(&caller).await?;
    Ok(web::Json(TemplateListResponse { templates }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockConfigurationQuery;
    use crate::domain::{DocumentTemplate, Identity, UserId};
    use crate::inbound::http::test_utils::{sign_in, state_with, test_app};
    use crate::test_support::{fixture_epoch, identity};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    async fn call(
        caller: Identity,
        configuration: MockConfigurationQuery,
        uri: &str,
    ) -> actix_web::dev::ServiceResponse {
        let state = state_with(|ports| ports.configuration = Arc::new(configuration));
        let app = test::init_service(
            test_app(state, Some(caller))
                .service(web::scope("/api").service(required_documents).service(templates)),
        )
        .await;
        let cookie = sign_in(&app).await;
        test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await
    }

    #[rstest]
    #[case("/api/configuration/required-documents")]
    #[case("/api/configuration/required-documents?serviceType=")]
    #[case("/api/configuration/required-documents?serviceType=%20%20")]
    #[actix_web::test]
    async fn missing_service_type_is_a_bad_request(#[case] uri: &str) {
        let mut configuration = MockConfigurationQuery::new();
        configuration.expect_required_documents().never();

        let res = call(identity(Role::Client), configuration, uri).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "serviceType");
    }

    #[rstest]
    #[actix_web::test]
    async fn total_counts_documents_and_inspections() {
        let mut configuration = MockConfigurationQuery::new();
        configuration
            .expect_required_documents()
            .withf(|service_type| service_type.as_ref() == "X")
            .times(1)
            .return_once(|_| {
                Ok(Requirements {
                    required_documents: vec!["Work order".into(), "Photo".into()],
                    required_inspections: vec!["Safety check".into()],
                })
            });

        let res = call(
            identity(Role::Employee),
            configuration,
            "/api/configuration/required-documents?serviceType=X",
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: RequiredDocumentsResponse = test::read_body_json(res).await;
        assert_eq!(body.service_type, "X");
        assert_eq!(
            body.total_required,
            body.required_documents.len() + body.required_inspections.len()
        );
        assert_eq!(body.total_required, 3);
    }

    #[rstest]
    #[actix_web::test]
    async fn service_type_is_echoed_trimmed() {
        let mut configuration = MockConfigurationQuery::new();
        configuration
            .expect_required_documents()
            .withf(|service_type| service_type.as_ref() == "X")
            .times(1)
            .return_once(|_| Ok(Requirements::default()));

        let res = call(
            identity(Role::Client),
            configuration,
            "/api/configuration/required-documents?serviceType=%20X%20",
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: RequiredDocumentsResponse = test::read_body_json(res).await;
        assert_eq!(body.service_type, "X");
        assert_eq!(body.total_required, 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn templates_are_for_administrators() {
        let mut configuration = MockConfigurationQuery::new();
        configuration.expect_templates().never();

        let res = call(
            identity(Role::Client),
            configuration,
            "/api/configuration/templates",
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn templates_are_listed() {
        let template = DocumentTemplate {
            id: Uuid::nil(),
            name: "Work order".to_owned(),
            user_id: UserId::random(),
            created_at: fixture_epoch(),
        };
        let mut configuration = MockConfigurationQuery::new();
        configuration
            .expect_templates()
            .times(1)
            .return_once(move |_| Ok(vec![template]));

        let res = call(
            identity(Role::Administrator),
            configuration,
            "/api/configuration/templates",
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["templates"][0]["name"], "Work order");
        assert_eq!(body["templates"][0]["createdAt"], "2026-01-05T08:00:00Z");
    }
}
