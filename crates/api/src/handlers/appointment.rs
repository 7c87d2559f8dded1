use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use lexcita_core::{
    errors::LexError,
    models::{
        appointment::{
            Appointment, AppointmentDetail, AppointmentFilter, AppointmentStatus,
            CreateAppointmentRequest, RescheduleRequest, UpdateStatusRequest,
        },
        fields,
        response::{Created, Listing, Single},
        user::Role,
    },
    scheduling::Slot,
};
use lexcita_db::{
    models::{convert_all, BookingClient, NewAppointment},
    repositories::{appointment, lawyer, service, user},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    booking,
    middleware::{
        auth::AuthUser,
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

fn not_found(id: Uuid) -> LexError {
    LexError::NotFound(format!("Cita {} no encontrada", id))
}

fn ensure_future(start: DateTime<Utc>) -> Result<(), LexError> {
    if start <= Utc::now() {
        return Err(LexError::Validation(
            "No se pueden agendar citas en el pasado".to_string(),
        ));
    }
    Ok(())
}

/// The slice of the appointment book a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    All,
    Lawyer(Uuid),
    Client(Uuid),
    Nothing,
}

impl Viewer {
    pub async fn of(state: &ApiState, caller: &AuthUser) -> Result<Self, AppError> {
        if caller.is_admin() {
            return Ok(Viewer::All);
        }

        let account = user::get_user_by_id(&state.db_pool, caller.id)
            .await?
            .ok_or_else(|| LexError::Authentication("La cuenta ya no existe".to_string()))?;

        let viewer = match (caller.role, account.lawyer_id, account.client_id) {
            (Role::Lawyer, Some(lawyer_id), _) => Viewer::Lawyer(lawyer_id),
            (Role::Client, _, Some(client_id)) => Viewer::Client(client_id),
            _ => Viewer::Nothing,
        };
        Ok(viewer)
    }

    pub fn can_see(&self, appointment: &Appointment) -> bool {
        match self {
            Viewer::All => true,
            Viewer::Lawyer(id) => appointment.lawyer_id == *id,
            Viewer::Client(id) => appointment.client_id == *id,
            Viewer::Nothing => false,
        }
    }

    /// Narrows a listing filter to what the viewer may see; `None` means nothing.
    pub fn restrict(&self, mut filter: AppointmentFilter) -> Option<AppointmentFilter> {
        match self {
            Viewer::All => Some(filter),
            Viewer::Lawyer(id) => {
                filter.lawyer_id = Some(*id);
                Some(filter)
            }
            Viewer::Client(id) => {
                filter.client_id = Some(*id);
                Some(filter)
            }
            Viewer::Nothing => None,
        }
    }
}

async fn load_visible(
    state: &ApiState,
    caller: &AuthUser,
    id: Uuid,
) -> Result<(Viewer, Appointment), AppError> {
    let viewer = Viewer::of(state, caller).await?;
    let row = appointment::get_appointment_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let current = Appointment::try_from(row)?;

    // Hidden appointments look missing rather than forbidden.
    if !viewer.can_see(&current) {
        return Err(not_found(id).into());
    }
    Ok((viewer, current))
}

/// Public booking from the appointment wizard.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateAppointmentRequest>,
) -> Result<Json<Created>, AppError> {
    payload.validate()?;
    let config = &state.config;

    let day = booking::parse_date(&payload.date)?;
    let starts_at = booking::local_start(config.timezone, &payload.date, &payload.time)?;
    ensure_future(starts_at)?;

    let counsel = lawyer::get_lawyer_by_id(&state.db_pool, payload.lawyer_id)
        .await?
        .filter(|l| l.active)
        .ok_or_else(|| {
            LexError::NotFound(format!("Abogado {} no encontrado", payload.lawyer_id))
        })?;

    let service_duration = match payload.service_id {
        Some(service_id) => {
            let found = service::get_service_by_id(&state.db_pool, service_id)
                .await?
                .filter(|s| s.active)
                .ok_or_else(|| {
                    LexError::NotFound(format!("Servicio {} no encontrado", service_id))
                })?;
            Some(found.duration_minutes)
        }
        None => None,
    };
    let duration = booking::resolve_duration(payload.duration, service_duration)?;
    let slot = Slot::new(starts_at, duration)?;
    booking::ensure_office_hours(&config.office_window(day)?, &slot)?;

    let new = NewAppointment {
        client: BookingClient::Contact {
            name: payload.client_name.trim().to_string(),
            email: payload.client_email.trim().to_lowercase(),
            phone: fields::normalize(payload.client_phone),
        },
        lawyer_id: counsel.id,
        company_id: counsel.company_id,
        service_id: payload.service_id,
        slot,
        notes: fields::normalize(payload.notes),
    };
    let row = booking::place(state.appointments.as_ref(), config.booking_scope, new).await?;

    Ok(Json(Created::new(row.id)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppQuery(filter): AppQuery<AppointmentFilter>,
) -> Result<Json<Listing<AppointmentDetail>>, AppError> {
    let viewer = Viewer::of(&state, &caller).await?;
    let Some(filter) = viewer.restrict(filter) else {
        return Ok(Json(Listing::new(Vec::new())));
    };

    let rows = appointment::list_appointment_details(&state.db_pool, &filter).await?;
    Ok(Json(Listing::new(convert_all(rows)?)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<AppointmentDetail>>, AppError> {
    let viewer = Viewer::of(&state, &caller).await?;
    let row = appointment::get_appointment_detail(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let detail = AppointmentDetail::try_from(row)?;

    if !viewer.can_see(&detail.appointment) {
        return Err(not_found(id).into());
    }
    Ok(Json(Single::new(detail)))
}

async fn transition(
    state: &ApiState,
    caller: &AuthUser,
    id: Uuid,
    next: AppointmentStatus,
) -> Result<Appointment, AppError> {
    let (viewer, current) = load_visible(state, caller, id).await?;

    // Clients may only withdraw their own bookings.
    if matches!(viewer, Viewer::Client(_)) && next != AppointmentStatus::Cancelled {
        return Err(LexError::Authorization(
            "Solo puede cancelar sus propias citas".to_string(),
        )
        .into());
    }
    current.status.ensure_transition(next)?;

    let row = appointment::update_status(&state.db_pool, id, current.status, next)
        .await?
        .ok_or_else(|| {
            LexError::Validation("La cita cambió de estado, intente nuevamente".to_string())
        })?;

    tracing::info!("Appointment {} moved from {} to {}", id, current.status, next);
    Ok(Appointment::try_from(row)?)
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> Result<Json<Single<Appointment>>, AppError> {
    let updated = transition(&state, &caller, id, payload.status).await?;
    Ok(Json(Single::new(updated)))
}

/// `DELETE` never removes the row; it cancels.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Single<Appointment>>, AppError> {
    let updated = transition(&state, &caller, id, AppointmentStatus::Cancelled).await?;
    Ok(Json(Single::new(updated)))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<RescheduleRequest>,
) -> Result<Json<Single<Appointment>>, AppError> {
    let (_, current) = load_visible(&state, &caller, id).await?;
    let config = &state.config;

    let day = booking::parse_date(&payload.date)?;
    let starts_at = booking::local_start(config.timezone, &payload.date, &payload.time)?;
    ensure_future(starts_at)?;
    let duration = booking::resolve_duration(payload.duration, Some(current.duration_minutes))?;
    let slot = Slot::new(starts_at, duration)?;
    booking::ensure_office_hours(&config.office_window(day)?, &slot)?;

    let row = booking::reschedule(
        state.appointments.as_ref(),
        config.booking_scope,
        &current,
        slot,
    )
    .await?;

    tracing::info!("Rescheduled appointment {} to {}", id, row.starts_at);
    Ok(Json(Single::new(Appointment::try_from(row)?)))
}
