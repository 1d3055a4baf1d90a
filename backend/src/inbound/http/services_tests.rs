//! Handler tests for the service lifecycle endpoints.

use super::*;
use crate::domain::ports::{MockServiceDeskCommand, MockServiceDeskQuery, ServiceDetail};
use crate::domain::{ErrorCode, Service, ServiceRecords, ServiceStatus, TransitionError};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{sign_in, state_with, test_app};
use crate::test_support::{fixture_epoch, identity};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

async fn call(
    caller: Option<Identity>,
    configure_ports: impl FnOnce(&mut HttpStatePorts),
    request: test::TestRequest,
) -> ServiceResponse {
    let signed_in = caller.is_some();
    let state = state_with(configure_ports);
    let app = test::init_service(
        test_app(state, caller).service(web::scope("/api").configure(configure)),
    )
    .await;
    let request = if signed_in {
        request.cookie(sign_in(&app).await)
    } else {
        request
    };
    test::call_service(&app, request.to_request()).await
}

fn with_command(command: MockServiceDeskCommand) -> impl FnOnce(&mut HttpStatePorts) {
    move |ports| ports.services = Arc::new(command)
}

fn with_query(query: MockServiceDeskQuery) -> impl FnOnce(&mut HttpStatePorts) {
    move |ports| ports.services_query = Arc::new(query)
}

fn pending_for(client: UserId) -> Service {
    Service::request(
        ServiceId::random(),
        client,
        ServiceType::new("installation").expect("type"),
        fixture_epoch(),
        fixture_epoch(),
    )
}

#[rstest]
#[actix_web::test]
async fn clients_request_services() {
    let client = identity(Role::Client);
    let created = pending_for(client.id);
    let mut command = MockServiceDeskCommand::new();
    command
        .expect_request_service()
        .withf(|_, request| {
            request.service_type.as_ref() == "installation"
                && request.start_date.to_rfc3339() == "2026-02-01T09:00:00+00:00"
        })
        .times(1)
        .return_once(move |_, _| Ok(created));

    let res = call(
        Some(client),
        with_command(command),
        test::TestRequest::post().uri("/api/services").set_json(json!({
            "serviceType": "installation",
            "startDate": "2026-02-01T10:00:00+01:00",
        })),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["employeeId"], Value::Null);
}

#[rstest]
#[case(json!({"startDate": "2026-02-01T09:00:00Z"}), "serviceType", "missing_field")]
#[case(json!({"serviceType": "installation"}), "startDate", "missing_field")]
#[case(json!({"serviceType": "installation", "startDate": "tomorrow"}), "startDate", "invalid_timestamp")]
#[actix_web::test]
async fn malformed_requests_never_reach_the_store(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockServiceDeskCommand::new();
    command.expect_request_service().never();

    let res = call(
        Some(identity(Role::Client)),
        with_command(command),
        test::TestRequest::post().uri("/api/services").set_json(payload),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[case("/api/services/pending", None, StatusCode::UNAUTHORIZED)]
#[case("/api/services/pending", Some(Role::Client), StatusCode::FORBIDDEN)]
#[case("/api/services/pending", Some(Role::Employee), StatusCode::FORBIDDEN)]
#[case("/api/services/completed", Some(Role::Client), StatusCode::FORBIDDEN)]
#[case("/api/services/mine", Some(Role::Employee), StatusCode::FORBIDDEN)]
#[case("/api/services/mine", Some(Role::Administrator), StatusCode::FORBIDDEN)]
#[case("/api/services/assigned", Some(Role::Client), StatusCode::FORBIDDEN)]
#[case("/api/services/in-progress", Some(Role::Administrator), StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn lists_reject_the_wrong_caller(
    #[case] uri: &str,
    #[case] role: Option<Role>,
    #[case] expected: StatusCode,
) {
    let mut query = MockServiceDeskQuery::new();
    query.expect_list().never();

    let res = call(
        role.map(identity),
        with_query(query),
        test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(res.status(), expected);
    let body: Value = test::read_body_json(res).await;
    assert!(body.get("services").is_none());
}

#[rstest]
#[case("/api/services/pending", Role::Administrator, ServiceView::Pending)]
#[case("/api/services/completed", Role::Administrator, ServiceView::Completed)]
#[case("/api/services/completed", Role::Employee, ServiceView::Completed)]
#[case("/api/services/mine", Role::Client, ServiceView::Mine)]
#[case("/api/services/assigned", Role::Employee, ServiceView::Assigned)]
#[case("/api/services/in-progress", Role::Employee, ServiceView::InProgress)]
#[actix_web::test]
async fn lists_ask_for_their_view(
    #[case] uri: &str,
    #[case] role: Role,
    #[case] view: ServiceView,
) {
    let caller = identity(role);
    let listed = vec![pending_for(UserId::random())];
    let mut query = MockServiceDeskQuery::new();
    query
        .expect_list()
        .withf(move |who, asked| who.role == role && *asked == view)
        .times(1)
        .return_once(move |_, _| Ok(listed));

    let res = call(Some(caller), with_query(query), test::TestRequest::get().uri(uri)).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: ServiceListResponse = test::read_body_json(res).await;
    assert_eq!(body.total, 1);
    assert_eq!(body.services.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn detail_includes_records() {
    let client = identity(Role::Client);
    let service = pending_for(client.id);
    let id = service.id();
    let mut query = MockServiceDeskQuery::new();
    query
        .expect_detail()
        .withf(move |_, asked| *asked == id)
        .times(1)
        .return_once(move |_, _| {
            Ok(ServiceDetail {
                service,
                records: ServiceRecords::default(),
            })
        });

    let res = call(
        Some(client),
        with_query(query),
        test::TestRequest::get().uri(&format!("/api/services/{id}")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["documents"], json!([]));
    assert_eq!(body["inspections"], json!([]));
    assert_eq!(body["evidences"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn hidden_services_are_not_found() {
    let mut query = MockServiceDeskQuery::new();
    query
        .expect_detail()
        .return_once(|_, id| Err(Error::not_found(format!("service {id} not found"))));

    let res = call(
        Some(identity(Role::Client)),
        with_query(query),
        test::TestRequest::get().uri(&format!("/api/services/{}", Uuid::new_v4())),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn malformed_ids_are_rejected() {
    let mut query = MockServiceDeskQuery::new();
    query.expect_detail().never();

    let res = call(
        Some(identity(Role::Administrator)),
        with_query(query),
        test::TestRequest::get().uri("/api/services/not-a-uuid"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "id");
}

#[rstest]
#[actix_web::test]
async fn assign_forwards_the_employee() {
    let employee = UserId::random();
    let service = pending_for(UserId::random());
    let id = service.id();
    let assigned = service.assign(employee).expect("assignable");
    let mut command = MockServiceDeskCommand::new();
    command
        .expect_assign()
        .withf(move |_, asked, target| *asked == id && *target == employee)
        .times(1)
        .return_once(move |_, _, _| Ok(assigned));

    let res = call(
        Some(identity(Role::Administrator)),
        with_command(command),
        test::TestRequest::post()
            .uri(&format!("/api/services/{id}/assign"))
            .set_json(json!({"employeeId": employee.to_string()})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: ServiceBody = test::read_body_json(res).await;
    assert_eq!(body.status, ServiceStatus::Assigned);
    assert_eq!(body.employee_id, Some(employee.to_string()));
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({"employeeId": "bob"}), "invalid_uuid")]
#[actix_web::test]
async fn assign_requires_an_employee_id(#[case] payload: Value, #[case] code: &str) {
    let mut command = MockServiceDeskCommand::new();
    command.expect_assign().never();

    let res = call(
        Some(identity(Role::Administrator)),
        with_command(command),
        test::TestRequest::post()
            .uri(&format!("/api/services/{}/assign", Uuid::new_v4()))
            .set_json(payload),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "employeeId");
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn invalid_transitions_conflict() {
    let mut command = MockServiceDeskCommand::new();
    command.expect_complete().return_once(|_, _| {
        Err(Error::from(TransitionError::InvalidTransition {
            action: crate::domain::ServiceAction::Complete,
            current: ServiceStatus::Assigned,
        }))
    });

    let res = call(
        Some(identity(Role::Employee)),
        with_command(command),
        test::TestRequest::post().uri(&format!("/api/services/{}/complete", Uuid::new_v4())),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Error = test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::InvalidTransition);
}

#[rstest]
#[case("start")]
#[case("complete")]
#[actix_web::test]
async fn only_employees_move_work_along(#[case] action: &str) {
    let mut command = MockServiceDeskCommand::new();
    command.expect_start().never();
    command.expect_complete().never();

    let res = call(
        Some(identity(Role::Administrator)),
        with_command(command),
        test::TestRequest::post().uri(&format!("/api/services/{}/{action}", Uuid::new_v4())),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn documents_are_created() {
    let service_id = ServiceId::random();
    let mut command = MockServiceDeskCommand::new();
    command
        .expect_add_record()
        .withf(|_, _, draft| {
            *draft
                == RecordDraft::Document {
                    name: "Work order".to_owned(),
                    url: "https://files.example.com/wo.pdf".to_owned(),
                }
        })
        .times(1)
        .return_once(move |_, _, draft| {
            Ok(draft.into_record(Uuid::nil(), service_id, fixture_epoch()))
        });

    let res = call(
        Some(identity(Role::Employee)),
        with_command(command),
        test::TestRequest::post()
            .uri(&format!("/api/services/{service_id}/documents"))
            .set_json(json!({"name": " Work order ", "url": "https://files.example.com/wo.pdf"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Document = test::read_body_json(res).await;
    assert_eq!(body.service_id, service_id);
    assert_eq!(body.name, "Work order");
}

#[rstest]
#[case("documents", json!({"name": "Work order", "url": "ftp://files"}), "url", "invalid_url")]
#[case("documents", json!({"url": "https://files.example.com"}), "name", "missing_field")]
#[case("inspections", json!({"notes": "ok"}), "result", "missing_field")]
#[case("evidences", json!({"description": "photo", "url": "photo.jpg"}), "url", "invalid_url")]
#[actix_web::test]
async fn invalid_records_are_rejected(
    #[case] kind: &str,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut command = MockServiceDeskCommand::new();
    command.expect_add_record().never();

    let res = call(
        Some(identity(Role::Employee)),
        with_command(command),
        test::TestRequest::post()
            .uri(&format!("/api/services/{}/{kind}", Uuid::new_v4()))
            .set_json(payload),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn records_on_idle_services_conflict() {
    let mut command = MockServiceDeskCommand::new();
    command
        .expect_add_record()
        .return_once(|_, _, _| Err(Error::conflict("service is not in progress")));

    let res = call(
        Some(identity(Role::Employee)),
        with_command(command),
        test::TestRequest::post()
            .uri(&format!("/api/services/{}/inspections", Uuid::new_v4()))
            .set_json(json!({"notes": "Pressure steady", "result": "pass"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}
