//! Profile edits, the staff directory, and the requirements catalogue.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use support::{ADMIN, CLIENT, DEMO_CLIENT_ID, Desk, EMPLOYEE, get, login, send};

async fn patch_profile<S, B>(
    app: &S,
    body: Value,
    cookie: &actix_web::cookie::Cookie<'static>,
) -> support::Reply
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    send(
        app,
        test::TestRequest::patch()
            .uri("/api/users/profile")
            .set_json(body),
        Some(cookie),
    )
    .await
}

#[actix_web::test]
async fn renaming_leaves_the_other_fields_alone() {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let client = login(&app, CLIENT).await;

    let res = patch_profile(&app, json!({ "name": "Ana" }), &client).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body["user"],
        json!({
            "id": DEMO_CLIENT_ID.to_string(),
            "name": "Ana",
            "email": "client@example.com",
            "phone": "+34 600 000 004",
        })
    );
    assert!(res.body["message"].is_string());
}

#[actix_web::test]
async fn renaming_refreshes_the_session_identity() {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let client = login(&app, CLIENT).await;

    let res = patch_profile(&app, json!({ "name": "Ana" }), &client).await;
    assert_eq!(res.status, StatusCode::OK);
    let client = res.session_cookie().expect("session rewritten");

    let session = get(&app, "/api/auth/session", Some(&client)).await;
    assert_eq!(session.status, StatusCode::OK);
    assert_eq!(session.body["user"]["name"], "Ana");
    assert_eq!(session.body["user"]["id"], DEMO_CLIENT_ID.to_string());

    let page = get(&app, "/dashboard/client", Some(&client)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["user"]["name"], "Ana");
}

#[actix_web::test]
async fn profile_changes_reach_the_directory() {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let employee = login(&app, EMPLOYEE).await;
    let admin = login(&app, ADMIN).await;

    let res = patch_profile(&app, json!({ "name": "Elena Ruiz", "phone": "" }), &employee).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["user"]["phone"].is_null());

    let employees = get(&app, "/api/employees/available", Some(&admin)).await;
    let names: Vec<&str> = employees.body["employees"]
        .as_array()
        .expect("employees")
        .iter()
        .map(|e| e["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["Elena Ruiz", "Emilio Empleado"]);
    assert_eq!(employees.body["total"], 2);
}

#[rstest]
#[case(json!({}), "body")]
#[case(json!({ "name": "   " }), "name")]
#[case(json!({ "phone": "call me maybe" }), "phone")]
#[actix_web::test]
async fn invalid_profile_updates_are_rejected(#[case] body: Value, #[case] field: &str) {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let client = login(&app, CLIENT).await;

    let res = patch_profile(&app, body, &client).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["details"]["field"], field);
}

#[actix_web::test]
async fn administrators_list_every_account() {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let admin = login(&app, ADMIN).await;

    let res = get(&app, "/api/users", Some(&admin)).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 4);
}

#[rstest]
#[case("/api/configuration/required-documents")]
#[case("/api/configuration/required-documents?serviceType=")]
#[case("/api/configuration/required-documents?serviceType=%20%20")]
#[actix_web::test]
async fn required_documents_need_a_service_type(#[case] uri: &str) {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let employee = login(&app, EMPLOYEE).await;

    let res = get(&app, uri, Some(&employee)).await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "invalid_request");
    assert_eq!(res.body["details"]["field"], "serviceType");
}

#[rstest]
#[case("X", 0)]
#[case("installation", 5)]
#[case("Repair", 4)]
#[actix_web::test]
async fn required_documents_total_every_requirement(#[case] service_type: &str, #[case] total: usize) {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let client = login(&app, CLIENT).await;

    let res = get(
        &app,
        &format!("/api/configuration/required-documents?serviceType={service_type}"),
        Some(&client),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    let documents = res.body["requiredDocuments"].as_array().expect("documents").len();
    let inspections = res.body["requiredInspections"].as_array().expect("inspections").len();
    assert_eq!(res.body["totalRequired"], documents + inspections);
    assert_eq!(res.body["totalRequired"], total);
}

#[actix_web::test]
async fn administrators_see_the_demo_templates() {
    let desk = Desk::seeded();
    let app = test::init_service(desk.app()).await;
    let admin = login(&app, ADMIN).await;

    let res = get(&app, "/api/configuration/templates", Some(&admin)).await;

    assert_eq!(res.status, StatusCode::OK);
    let names: Vec<&str> = res.body["templates"]
        .as_array()
        .expect("templates")
        .iter()
        .map(|t| t["name"].as_str().expect("name"))
        .collect();
    assert!(names.contains(&"Installation certificate"));
    assert!(names.contains(&"Maintenance report"));
}
