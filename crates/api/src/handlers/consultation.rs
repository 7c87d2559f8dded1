use axum::{extract::State, Json};
use lexcita_core::{
    errors::LexError,
    models::{
        consultation::{
            Consultation, ConsultationInput, ConsultationStatus, UpdateConsultationStatusRequest,
        },
        response::{Created, Listing, Single},
    },
};
use lexcita_db::{models::convert_all, repositories::consultation};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::AuthUser,
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

fn not_found(id: Uuid) -> LexError {
    LexError::NotFound(format!("Consulta {} no encontrada", id))
}

#[derive(Debug, Default, Deserialize)]
pub struct ConsultationListQuery {
    pub status: Option<ConsultationStatus>,
}

/// Public form on the site.
#[axum::debug_handler]
pub async fn create_consultation(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<ConsultationInput>,
) -> Result<Json<Created>, AppError> {
    payload.validate()?;

    let row = consultation::create_consultation(&state.db_pool, &payload).await?;
    tracing::info!("Received consultation {}", row.id);
    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppQuery(query): AppQuery<ConsultationListQuery>,
) -> Result<Json<Listing<Consultation>>, AppError> {
    caller.require_admin()?;

    let rows = consultation::list_consultations(&state.db_pool, query.status).await?;
    Ok(Json(Listing::new(convert_all(rows)?)))
}

#[axum::debug_handler]
pub async fn get_consultation(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<Consultation>>, AppError> {
    caller.require_admin()?;

    let row = consultation::get_consultation_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(Consultation::try_from(row)?)))
}

#[axum::debug_handler]
pub async fn update_consultation_status(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateConsultationStatusRequest>,
) -> Result<Json<Single<Consultation>>, AppError> {
    caller.require_admin()?;

    let row = consultation::update_consultation_status(&state.db_pool, id, payload.status)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(Consultation::try_from(row)?)))
}
