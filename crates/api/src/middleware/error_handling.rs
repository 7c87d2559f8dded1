//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and `{"error": message}` bodies.
//!
//! Scheduling conflicts are reported as 400 with a message meant for the end
//! user. Database and internal failures are logged here and answered with a
//! generic 500 body so driver messages never reach the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lexcita_core::errors::LexError;
use serde_json::json;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error wrapper that provides HTTP status code mapping
///
/// ```
/// use axum::Json;
/// use lexcita_api::middleware::error_handling::AppError;
/// use lexcita_core::errors::LexError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(LexError::NotFound("Cita no encontrada".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub LexError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LexError::NotFound(_) => StatusCode::NOT_FOUND,
            LexError::Validation(_) | LexError::Conflict(_) => StatusCode::BAD_REQUEST,
            LexError::Authentication(_) => StatusCode::UNAUTHORIZED,
            LexError::Authorization(_) => StatusCode::FORBIDDEN,
            LexError::Database(_) | LexError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text sent to the client.
    pub fn public_message(&self) -> String {
        match &self.0 {
            LexError::NotFound(msg)
            | LexError::Validation(msg)
            | LexError::Conflict(msg)
            | LexError::Authentication(msg)
            | LexError::Authorization(msg) => msg.clone(),
            LexError::Database(_) | LexError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_internal() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `LexResult` inside handlers.
impl From<LexError> for AppError {
    fn from(err: LexError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(LexError::Database(err))
    }
}

// Extractor rejections become 400s with the usual body.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(LexError::Validation(format!(
            "Cuerpo JSON inválido: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(LexError::Validation(format!(
            "Parámetro de ruta inválido: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(LexError::Validation(format!(
            "Parámetros de consulta inválidos: {}",
            rejection.body_text()
        )))
    }
}

/// Turns constraint violations on writes into validation errors.
///
/// `duplicate` is returned for UNIQUE violations, `in_use` for FOREIGN KEY
/// violations; anything else stays a database error.
pub fn constraint_error(err: eyre::Report, duplicate: &str, in_use: &str) -> LexError {
    if lexcita_db::is_unique_violation(&err) {
        LexError::Validation(duplicate.to_string())
    } else if lexcita_db::is_foreign_key_violation(&err) {
        LexError::Validation(in_use.to_string())
    } else {
        LexError::Database(err)
    }
}
