use axum::{extract::State, Json};
use chrono::Utc;
use lexcita_core::{
    errors::LexError,
    models::{
        appointment::{Appointment, AvailabilityQuery, AvailabilityResponse, AvailableSlot},
        lawyer::{Lawyer, LawyerInput},
        response::{Ack, Created, Listing, Single},
    },
    scheduling,
};
use lexcita_db::{
    models::convert_all,
    repositories::{appointment, lawyer},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    booking,
    middleware::{
        auth::AuthUser,
        error_handling::{constraint_error, AppError},
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

const DUPLICATE_LAWYER: &str = "Ya existe un abogado con ese email";
const LAWYER_IN_USE: &str = "El abogado tiene citas o una cuenta asociada";

fn not_found(id: Uuid) -> LexError {
    LexError::NotFound(format!("Abogado {} no encontrado", id))
}

#[derive(Debug, Default, Deserialize)]
pub struct LawyerListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Public: the booking wizard lists lawyers before anyone signs in.
#[axum::debug_handler]
pub async fn list_lawyers(
    State(state): State<Arc<ApiState>>,
    AppQuery(query): AppQuery<LawyerListQuery>,
) -> Result<Json<Listing<Lawyer>>, AppError> {
    let rows = lawyer::list_lawyers(&state.db_pool, !query.include_inactive).await?;
    Ok(Json(Listing::new(rows.into_iter().map(Lawyer::from).collect())))
}

#[axum::debug_handler]
pub async fn get_lawyer(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<Lawyer>>, AppError> {
    let row = lawyer::get_lawyer_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn create_lawyer(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppJson(payload): AppJson<LawyerInput>,
) -> Result<Json<Created>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = lawyer::create_lawyer(&state.db_pool, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_LAWYER, "La empresa indicada no existe"))?;

    tracing::info!("Created lawyer {}", row.id);
    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn update_lawyer(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<LawyerInput>,
) -> Result<Json<Single<Lawyer>>, AppError> {
    user.require_admin()?;
    payload.validate()?;

    let row = lawyer::update_lawyer(&state.db_pool, id, &payload)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_LAWYER, "La empresa indicada no existe"))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(Single::new(row.into())))
}

#[axum::debug_handler]
pub async fn delete_lawyer(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Ack>, AppError> {
    user.require_admin()?;

    let deleted = lawyer::delete_lawyer(&state.db_pool, id)
        .await
        .map_err(|e| constraint_error(e, DUPLICATE_LAWYER, LAWYER_IN_USE))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!("Deleted lawyer {}", id);
    Ok(Json(Ack::new("Abogado eliminado")))
}

/// Free start times for one lawyer on one local date.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let config = &state.config;
    let duration = booking::resolve_duration(query.duration, None)?;
    let date = booking::parse_date(&query.date)?;

    let row = lawyer::get_lawyer_by_id(&state.db_pool, id)
        .await?
        .filter(|l| l.active)
        .ok_or_else(|| not_found(id))?;

    let window = config.office_window(date)?;
    let resource = config.booking_scope.resource_for(row.id, row.company_id);
    let rows =
        appointment::list_blocking_between(&state.db_pool, &resource, window.start, window.end)
            .await?;
    let taken: Vec<Appointment> = convert_all(rows)?;

    let slots = scheduling::free_slots(
        &window,
        config.slot_step_minutes,
        duration,
        &taken,
        Some(Utc::now()),
    )?;

    Ok(Json(AvailabilityResponse {
        success: true,
        lawyer_id: row.id,
        date: date.format("%Y-%m-%d").to_string(),
        duration_minutes: duration,
        slots: slots
            .into_iter()
            .map(|slot| AvailableSlot {
                starts_at: slot.start,
                local_time: slot
                    .start
                    .with_timezone(&config.timezone)
                    .format("%H:%M")
                    .to_string(),
            })
            .collect(),
    }))
}
