use axum::{extract::State, Json};
use lexcita_core::{
    errors::LexError,
    models::{
        response::{Ack, Created, Listing, Single},
        service::{LegalService, ServiceInput},
    },
};
use lexcita_db::repositories::service;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::AuthUser,
        error_handling::{constraint_error, AppError},
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

const DUPLICATE_SERVICE: &str = "Ya existe un servicio con esos datos";
const SERVICE_IN_USE: &str = "El servicio tiene citas asociadas, desactívelo en su lugar";

fn not_found(id: Uuid) -> LexError {
    LexError::NotFound(format!("Servicio {} no encontrado", id))
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<ServiceListQuery>,
) -> Result<Json<Listing<LegalService>>, AppError> {
    let rows = service::list_services(&state.db_pool, !query.include_inactive).await?;
    Ok(Json(Listing::new(rows.into_iter().map(LegalService::from).collect())))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<LegalService>>, AppError> {
    let row = service::get_service_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppJson(payload): AppJson<ServiceInput>,
) -> Result<Json<Created>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = service::create_service(&state.db_pool, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_SERVICE, SERVICE_IN_USE))?;

    tracing::info!("Created service {}", row.id);
    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ServiceInput>,
) -> Result<Json<Single<LegalService>>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = service::update_service(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Ack>, AppError> {
    user.require_admin()?;

    let deleted = service::delete_service(&state.db_pool, id)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_SERVICE, SERVICE_IN_USE))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!("Deleted service {}", id);
    Ok(Json(Ack::new("Servicio eliminado")))
}
