//! The booking flow shared by the REST and action-style endpoints.
//!
//! Request dates and times are wall-clock values in the firm's time zone.
//! They are resolved to UTC here, before any overlap check runs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use lexcita_core::{
    errors::{LexError, LexResult},
    models::appointment::Appointment,
    scheduling::{self, BookingScope, Slot, SLOT_TAKEN_MESSAGE},
};
use lexcita_db::{
    models::{DbAppointment, NewAppointment},
    repositories::appointment::{AppointmentStore, Booking},
};

pub fn parse_date(date: &str) -> LexResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        LexError::Validation(format!("Fecha no válida, use AAAA-MM-DD: {}", date))
    })
}

pub fn parse_time(time: &str) -> LexResult<NaiveTime> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| LexError::Validation(format!("Hora no válida, use HH:MM: {}", time)))
}

/// Resolves a local wall-clock time to UTC.
///
/// Ambiguous times (a DST fold) take the earlier instant; times that do not
/// exist (a DST gap) are rejected.
pub fn to_utc(tz: Tz, local: NaiveDateTime) -> LexResult<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| LexError::Validation(format!("La hora {} no existe en {}", local, tz)))
}

pub fn local_start(tz: Tz, date: &str, time: &str) -> LexResult<DateTime<Utc>> {
    let local = parse_date(date)?.and_time(parse_time(time)?);
    to_utc(tz, local)
}

/// Office hours on `date` as a UTC window.
pub fn office_window(
    tz: Tz,
    date: NaiveDate,
    opens: NaiveTime,
    closes: NaiveTime,
) -> LexResult<Slot> {
    let start = to_utc(tz, date.and_time(opens))?;
    let end = to_utc(tz, date.and_time(closes))?;
    if end <= start {
        return Err(LexError::Validation("El horario de oficina no es válido".to_string()));
    }
    Ok(Slot::from_bounds(start, end))
}

/// Rejects a slot that starts before opening or ends after closing.
pub fn ensure_office_hours(window: &Slot, slot: &Slot) -> LexResult<()> {
    if !window.contains(slot) {
        return Err(LexError::Validation(
            "La cita debe estar dentro del horario de atención".to_string(),
        ));
    }
    Ok(())
}

/// Requested duration, else the service's, else the default; then range-checked.
pub fn resolve_duration(requested: Option<i32>, service_default: Option<i32>) -> LexResult<i32> {
    let minutes = requested
        .or(service_default)
        .unwrap_or(scheduling::DEFAULT_DURATION_MINUTES);
    scheduling::validate_duration(minutes)?;
    Ok(minutes)
}

fn into_result(booking: Booking) -> LexResult<DbAppointment> {
    match booking {
        Booking::Booked(row) => Ok(row),
        Booking::Conflict { with } => {
            tracing::info!("Booking rejected, slot overlaps appointment {}", with);
            Err(LexError::Conflict(SLOT_TAKEN_MESSAGE.to_string()))
        }
    }
}

/// Books `new` on the calendar selected by `scope`.
pub async fn place(
    store: &dyn AppointmentStore,
    scope: BookingScope,
    new: NewAppointment,
) -> LexResult<DbAppointment> {
    let resource = scope.resource_for(new.lawyer_id, new.company_id);
    let booking = store.book(resource, new).await?;
    let row = into_result(booking)?;
    tracing::info!("Booked appointment {} for lawyer {}", row.id, row.lawyer_id);
    Ok(row)
}

/// Moves an open appointment to `slot`, ignoring its own current interval.
pub async fn reschedule(
    store: &dyn AppointmentStore,
    scope: BookingScope,
    appointment: &Appointment,
    slot: Slot,
) -> LexResult<DbAppointment> {
    if !appointment.status.blocks_slot() {
        return Err(LexError::Validation(format!(
            "No se puede reprogramar una cita en estado {}",
            appointment.status
        )));
    }
    let resource = scope.resource_for(appointment.lawyer_id, appointment.company_id);
    let booking = store.reschedule(resource, appointment.id, slot).await?;
    into_result(booking)
}
