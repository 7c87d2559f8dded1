use axum::Json;
use lexcita_core::identity::{self, IdentityKind};
use serde::{Deserialize, Serialize};

use crate::middleware::extract::AppJson;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRequest {
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub success: bool,
    pub valid: bool,
    pub kind: Option<IdentityKind>,
}

/// Checks a cédula or RUC. An invalid number is a normal answer, not an error.
#[axum::debug_handler]
pub async fn validate(AppJson(payload): AppJson<IdentityRequest>) -> Json<IdentityResponse> {
    let kind = identity::classify(payload.number.trim());
    Json(IdentityResponse {
        success: true,
        valid: kind.is_some(),
        kind,
    })
}
