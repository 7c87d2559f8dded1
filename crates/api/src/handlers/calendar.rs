use axum::{extract::State, response::Response};
use chrono::Utc;
use lexcita_core::{
    calendar,
    errors::LexError,
    models::appointment::{AppointmentDetail, AppointmentFilter},
};
use lexcita_db::{
    models::convert_all,
    repositories::{appointment, client, lawyer},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::{appointment::Viewer, report::attachment},
    middleware::{auth::AuthUser, error_handling::AppError, extract::AppPath},
    ApiState,
};

const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";

fn ics(state: &ApiState, name: &str, file_name: &str, details: &[AppointmentDetail]) -> Response {
    let body = calendar::render(name, &state.config.calendar_domain, details, Utc::now());
    attachment(CONTENT_TYPE, file_name, body)
}

fn forbidden() -> LexError {
    LexError::Authorization("No tiene acceso a este calendario".to_string())
}

async fn scoped_details(
    state: &ApiState,
    viewer: Viewer,
    filter: AppointmentFilter,
) -> Result<Vec<AppointmentDetail>, AppError> {
    let Some(filter) = viewer.restrict(filter) else {
        return Ok(Vec::new());
    };
    let rows = appointment::list_appointment_details(&state.db_pool, &filter).await?;
    Ok(convert_all(rows)?)
}

#[axum::debug_handler]
pub async fn appointment_calendar(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, AppError> {
    let viewer = Viewer::of(&state, &caller).await?;
    let row = appointment::get_appointment_detail(&state.db_pool, id)
        .await?
        .ok_or_else(|| LexError::NotFound(format!("Cita {} no encontrada", id)))?;
    let detail = AppointmentDetail::try_from(row)?;
    if !viewer.can_see(&detail.appointment) {
        return Err(LexError::NotFound(format!("Cita {} no encontrada", id)).into());
    }

    Ok(ics(&state, "Cita", &format!("cita_{}.ics", id), &[detail]))
}

#[axum::debug_handler]
pub async fn client_calendar(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, AppError> {
    let viewer = Viewer::of(&state, &caller).await?;
    if matches!(viewer, Viewer::Client(own) if own != id) {
        return Err(forbidden().into());
    }

    let owner = client::get_client_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| LexError::NotFound(format!("Cliente {} no encontrado", id)))?;
    let filter = AppointmentFilter {
        client_id: Some(id),
        ..Default::default()
    };
    let details = scoped_details(&state, viewer, filter).await?;

    Ok(ics(
        &state,
        &format!("Citas de {}", owner.name),
        &format!("cliente_{}.ics", id),
        &details,
    ))
}

#[axum::debug_handler]
pub async fn lawyer_calendar(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response, AppError> {
    let viewer = Viewer::of(&state, &caller).await?;
    if matches!(viewer, Viewer::Lawyer(own) if own != id) {
        return Err(forbidden().into());
    }

    let owner = lawyer::get_lawyer_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| LexError::NotFound(format!("Abogado {} no encontrado", id)))?;
    let filter = AppointmentFilter {
        lawyer_id: Some(id),
        ..Default::default()
    };
    let details = scoped_details(&state, viewer, filter).await?;

    Ok(ics(
        &state,
        &format!("Agenda de {}", owner.name),
        &format!("abogado_{}.ics", id),
        &details,
    ))
}
