use axum::{extract::State, Json};
use lexcita_core::{
    errors::LexError,
    models::{
        contact::{ContactInput, ContactMessage, MarkReadRequest},
        response::{Created, Listing, Single},
    },
};
use lexcita_db::repositories::contact;
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
    LexError::NotFound(format!("Mensaje {} no encontrado", id))
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactListQuery {
    #[serde(default)]
    pub unread: bool,
}

#[axum::debug_handler]
pub async fn create_contact_message(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<ContactInput>,
) -> Result<Json<Created>, AppError> {
    payload.validate()?;

    let row = contact::create_contact_message(&state.db_pool, &payload).await?;
    tracing::info!("Received contact message {}", row.id);
    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn list_contact_messages(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppQuery(query): AppQuery<ContactListQuery>,
) -> Result<Json<Listing<ContactMessage>>, AppError> {
    caller.require_admin()?;

    let rows = contact::list_contact_messages(&state.db_pool, query.unread).await?;
    Ok(Json(Listing::new(rows.into_iter().map(ContactMessage::from).collect())))
}

#[axum::debug_handler]
pub async fn get_contact_message(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<ContactMessage>>, AppError> {
    caller.require_admin()?;

    let row = contact::get_contact_message_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn mark_contact_message(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<MarkReadRequest>,
) -> Result<Json<Single<ContactMessage>>, AppError> {
    caller.require_admin()?;

    let row = contact::mark_contact_message_read(&state.db_pool, id, payload.read)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}
