use axum::{extract::State, Json};
use lexcita_core::{
    errors::LexError,
    models::{
        client::{Client, ClientInput},
        response::{Ack, Created, Listing, Single},
        user::Role,
    },
};
use lexcita_db::repositories::client;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::AuthUser,
        error_handling::{constraint_error, AppError},
        extract::{AppJson, AppPath},
    },
    ApiState,
};

const DUPLICATE_CLIENT: &str = "Ya existe un cliente con ese email o cédula";
const CLIENT_IN_USE: &str = "El cliente tiene citas o una cuenta asociada";

fn not_found(id: Uuid) -> LexError {
    LexError::NotFound(format!("Cliente {} no encontrado", id))
}

#[axum::debug_handler]
pub async fn list_clients(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<Listing<Client>>, AppError> {
    user.require_any(&[Role::Admin, Role::Lawyer])?;

    let rows = client::list_clients(&state.db_pool).await?;
    Ok(Json(Listing::new(rows.into_iter().map(Client::from).collect())))
}

#[axum::debug_handler]
pub async fn get_client(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<Client>>, AppError> {
    user.require_any(&[Role::Admin, Role::Lawyer])?;

    let row = client::get_client_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn create_client(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppJson(payload): AppJson<ClientInput>,
) -> Result<Json<Created>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = client::create_client(&state.db_pool, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_CLIENT, "La empresa indicada no existe"))?;

    tracing::info!("Created client {}", row.id);
    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn update_client(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ClientInput>,
) -> Result<Json<Single<Client>>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = client::update_client(&state.db_pool, id, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_CLIENT, "La empresa indicada no existe"))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Ack>, AppError> {
    user.require_admin()?;

    let deleted = client::delete_client(&state.db_pool, id)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_CLIENT, CLIENT_IN_USE))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!("Deleted client {}", id);
    Ok(Json(Ack::new("Cliente eliminado")))
}
