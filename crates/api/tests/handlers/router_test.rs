use axum::http::StatusCode;
use lexcita_core::models::user::Role;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, token, TestContext};

#[tokio::test]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(version.json::<Value>()["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_chatbot_answers_on_both_paths() {
    let server = TestContext::new().server();

    for path in ["/api/chatbot", "/chatbot"] {
        let response = server
            .post(path)
            .json(&json!({ "query": "Hola, quiero agendar una cita" }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(body["topic"], "appointment");
        assert!(body["suggestions"].as_array().is_some());
    }
}

#[tokio::test]
async fn test_chatbot_rejects_empty_query() {
    let server = TestContext::new().server();

    let response = server.post("/api/chatbot").json(&json!({ "query": "   " })).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_identity_validation() {
    let server = TestContext::new().server();

    let valid = server
        .post("/api/identity/validate")
        .json(&json!({ "number": "1710034065" }))
        .await
        .json::<Value>();
    assert_eq!(valid["valid"], true);
    assert_eq!(valid["kind"], "cedula");

    let ruc = server
        .post("/api/identity/validate")
        .json(&json!({ "number": "1790011674001" }))
        .await
        .json::<Value>();
    assert_eq!(ruc["kind"], "ruc_private");

    let invalid = server
        .post("/api/identity/validate")
        .json(&json!({ "number": "1710034066" }))
        .await
        .json::<Value>();
    assert_eq!(invalid["valid"], false);
    assert_eq!(invalid["kind"], Value::Null);
}

#[tokio::test]
async fn test_status_without_token_is_anonymous() {
    let server = TestContext::new().server();

    let rest = server.get("/api/auth/status").await;
    let action = server.get("/auth").add_query_param("action", "status").await;

    for response in [rest, action] {
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["authenticated"], false);
    }
}

#[tokio::test]
async fn test_logout_is_acknowledged() {
    let server = TestContext::new().server();
    let (name, value) = bearer(&token(Role::Client));

    let response = server.post("/api/auth/logout").add_header(name, value).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);
}

#[tokio::test]
async fn test_protected_routes_need_a_token() {
    let server = TestContext::new().server();

    for path in [
        "/api/appointments",
        "/api/auth/user",
        "/api/reports/clients",
        "/api/contact",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
    }

    for (path, key, value) in [("/auth", "action", "user"), ("/reports", "type", "clients")] {
        let response = server.get(path).add_query_param(key, value).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let server = TestContext::new().server();
    let (name, value) = bearer("eyJzdWIiOiJ4In0.c2lnbmF0dXJl");

    let response = server.get("/api/appointments").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_only_routes_reject_clients() {
    let server = TestContext::new().server();
    let client_token = token(Role::Client);

    let (name, value) = bearer(&client_token);
    let report = server.get("/api/reports/companies").add_header(name, value).await;
    assert_eq!(report.status_code(), StatusCode::FORBIDDEN);

    let (name, value) = bearer(&client_token);
    let create = server
        .post("/api/companies")
        .add_header(name, value)
        .json(&json!({ "name": "Acme", "ruc": "1790011674001" }))
        .await;
    assert_eq!(create.status_code(), StatusCode::FORBIDDEN);

    let (name, value) = bearer(&client_token);
    let inbox = server.get("/api/consultations").add_header(name, value).await;
    assert_eq!(inbox.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_report_type_is_bad_request() {
    let server = TestContext::new().server();
    let (name, value) = bearer(&token(Role::Admin));

    let response = server.get("/api/reports/invoices").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_company_with_invalid_ruc_is_rejected() {
    let server = TestContext::new().server();
    let (name, value) = bearer(&token(Role::Admin));

    let response = server
        .post("/api/companies")
        .add_header(name, value)
        .json(&json!({ "name": "Acme", "ruc": "1790011674000" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ana Pérez",
            "email": "ana@example.com",
            "password": "short",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_rejects_invalid_input_before_storage() {
    let server = TestContext::new().server();
    let lawyer_id = Uuid::new_v4();

    let bad_email = server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_email": "not-an-email",
            "lawyer_id": lawyer_id,
            "date": "2099-01-10",
            "time": "09:00",
        }))
        .await;
    assert_eq!(bad_email.status_code(), StatusCode::BAD_REQUEST);

    let in_past = server
        .post("/appointments")
        .add_query_param("action", "create")
        .json(&json!({
            "client_name": "Ana",
            "client_email": "ana@example.com",
            "lawyer_id": lawyer_id,
            "date": "2020-01-10",
            "time": "09:00",
        }))
        .await;
    assert_eq!(in_past.status_code(), StatusCode::BAD_REQUEST);

    let bad_time = server
        .post("/api/appointments")
        .json(&json!({
            "client_name": "Ana",
            "client_email": "ana@example.com",
            "lawyer_id": lawyer_id,
            "date": "2099-01-10",
            "time": "25:00",
        }))
        .await;
    assert_eq!(bad_time.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_action_routes_validate_their_parameters() {
    let server = TestContext::new().server();

    let unknown = server
        .post("/appointments")
        .add_query_param("action", "delete")
        .json(&json!({}))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::BAD_REQUEST);

    let bad_body = server
        .post("/appointments")
        .add_query_param("action", "create")
        .text("not json")
        .await;
    assert_eq!(bad_body.status_code(), StatusCode::BAD_REQUEST);

    let (name, value) = bearer(&token(Role::Admin));
    let missing_id = server
        .get("/appointments")
        .add_query_param("action", "get")
        .add_header(name, value)
        .await;
    assert_eq!(missing_id.status_code(), StatusCode::BAD_REQUEST);

    let (name, value) = bearer(&token(Role::Admin));
    let calendar = server
        .get("/calendar")
        .add_query_param("action", "cita")
        .add_header(name, value)
        .await;
    assert_eq!(calendar.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_availability_rejects_bad_date() {
    let server = TestContext::new().server();

    let response = server
        .get(&format!("/api/lawyers/{}/availability", Uuid::new_v4()))
        .add_query_param("date", "tomorrow")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_requests_answer_with_error_body() {
    let server = TestContext::new().server();

    let missing_fields = server
        .post("/api/appointments")
        .json(&json!({ "client_name": "Ana" }))
        .await;
    assert_eq!(missing_fields.status_code(), StatusCode::BAD_REQUEST);
    assert!(missing_fields.json::<Value>()["error"].is_string());

    let not_json = server
        .post("/api/chatbot")
        .text("{ query")
        .content_type("application/json")
        .await;
    assert_eq!(not_json.status_code(), StatusCode::BAD_REQUEST);
    assert!(not_json.json::<Value>()["error"].is_string());

    let bad_id = server.get("/api/lawyers/not-a-uuid").await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
    assert!(bad_id.json::<Value>()["error"].is_string());

    let availability = format!("/api/lawyers/{}/availability", Uuid::new_v4());

    let missing_date = server.get(&availability).await;
    assert_eq!(missing_date.status_code(), StatusCode::BAD_REQUEST);
    assert!(missing_date.json::<Value>()["error"].is_string());

    let bad_duration = server
        .get(&availability)
        .add_query_param("date", "2099-01-10")
        .add_query_param("duration", "abc")
        .await;
    assert_eq!(bad_duration.status_code(), StatusCode::BAD_REQUEST);
    assert!(bad_duration.json::<Value>()["error"].is_string());
}
