use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use chrono::{Duration, Utc};
use lexcita_api::middleware::{
    auth::{self, AuthUser},
    error_handling::{AppError, INTERNAL_ERROR_MESSAGE},
};
use lexcita_core::{errors::LexError, models::user::Role, scheduling::SLOT_TAKEN_MESSAGE};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::SECRET;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case::not_found(LexError::NotFound("x".into()), StatusCode::NOT_FOUND)]
#[case::validation(LexError::Validation("x".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(LexError::Conflict("x".into()), StatusCode::BAD_REQUEST)]
#[case::authentication(LexError::Authentication("x".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(LexError::Authorization("x".into()), StatusCode::FORBIDDEN)]
#[case::database(LexError::Database(eyre::eyre!("x")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: LexError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), expected);
}

#[tokio::test]
async fn test_conflict_body_carries_user_message() {
    let response = AppError(LexError::Conflict(SLOT_TAKEN_MESSAGE.to_string())).into_response();

    let body = body_json(response).await;
    assert_eq!(body["error"], SLOT_TAKEN_MESSAGE);
}

#[tokio::test]
async fn test_database_error_is_not_echoed() {
    let response = AppError(LexError::Database(eyre::eyre!(
        "duplicate key value violates unique constraint \"clients_email_key\""
    )))
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
}

#[test]
fn test_eyre_report_becomes_database_error() {
    let err: AppError = eyre::eyre!("connection reset").into();
    assert!(matches!(err.0, LexError::Database(_)));
}

#[test]
fn test_password_hash_verifies() {
    let hash = auth::hash_password("s3cret-pass").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(auth::verify_password("s3cret-pass", &hash).unwrap());
    assert!(!auth::verify_password("wrong-pass", &hash).unwrap());
}

#[test]
fn test_malformed_hash_is_an_error() {
    assert!(auth::verify_password("anything", "not-a-phc-string").is_err());
}

#[test]
fn test_token_carries_claims() {
    let now = Utc::now();
    let user_id = Uuid::new_v4();
    let (token, expires_at) =
        auth::issue_token(SECRET, user_id, Role::Lawyer, Duration::hours(2), now).unwrap();

    let claims = auth::verify_token(SECRET, &token, now).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, Role::Lawyer);
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let now = Utc::now();
    let (token, _) = auth::issue_token(
        "another-secret-that-is-long-enough!!",
        Uuid::new_v4(),
        Role::Admin,
        Duration::hours(1),
        now,
    )
    .unwrap();

    let result = auth::verify_token(SECRET, &token, now);
    assert!(matches!(result, Err(LexError::Authentication(_))));
}

#[test]
fn test_expired_token_is_rejected() {
    let issued = Utc::now() - Duration::hours(3);
    let (token, _) =
        auth::issue_token(SECRET, Uuid::new_v4(), Role::Client, Duration::hours(1), issued)
            .unwrap();

    let result = auth::verify_token(SECRET, &token, Utc::now());
    assert!(matches!(result, Err(LexError::Authentication(_))));
}

#[test]
fn test_out_of_range_lifetime_is_an_error() {
    let result = auth::issue_token(
        SECRET,
        Uuid::new_v4(),
        Role::Client,
        Duration::days(365 * 1_000_000),
        Utc::now(),
    );

    assert!(matches!(result, Err(LexError::Internal(_))));
}

#[test]
fn test_tampered_role_is_rejected() {
    let now = Utc::now();
    let (client_token, _) =
        auth::issue_token(SECRET, Uuid::new_v4(), Role::Client, Duration::hours(1), now).unwrap();
    let (admin_token, _) =
        auth::issue_token(SECRET, Uuid::new_v4(), Role::Admin, Duration::hours(1), now).unwrap();

    // Admin claims with the client's signature
    let (admin_claims, _) = admin_token.split_once('.').unwrap();
    let (_, client_signature) = client_token.split_once('.').unwrap();
    let forged = format!("{}.{}", admin_claims, client_signature);

    assert!(auth::verify_token(SECRET, &forged, now).is_err());
}

#[rstest]
#[case("", false)]
#[case("no-dot-here", false)]
#[case("abc.def", false)]
#[case("...", false)]
fn test_garbage_tokens_are_rejected(#[case] token: &str, #[case] ok: bool) {
    assert_eq!(auth::verify_token(SECRET, token, Utc::now()).is_ok(), ok);
}

#[test]
fn test_bearer_token_parsing() {
    let mut headers = axum::http::HeaderMap::new();
    assert_eq!(auth::bearer_token(&headers), None);

    headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
    assert_eq!(auth::bearer_token(&headers), None);

    headers.insert("authorization", "Bearer abc.def".parse().unwrap());
    assert_eq!(auth::bearer_token(&headers), Some("abc.def"));
}

#[test]
fn test_role_checks() {
    let lawyer = AuthUser {
        id: Uuid::new_v4(),
        role: Role::Lawyer,
    };

    assert!(lawyer.require_any(&[Role::Admin, Role::Lawyer]).is_ok());
    assert!(matches!(
        lawyer.require_admin(),
        Err(LexError::Authorization(_))
    ));
    assert!(!lawyer.is_admin());
}
