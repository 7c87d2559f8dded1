use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::Guayaquil;
use lexcita_api::{booking, middleware::error_handling::AppError};
use lexcita_core::{
    errors::LexError,
    models::appointment::{Appointment, AppointmentStatus},
    scheduling::{BookingScope, Slot},
};
use lexcita_db::{
    mock::memory::InMemoryAppointmentStore,
    models::{BookingClient, NewAppointment},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use uuid::Uuid;

fn new_appointment(lawyer_id: Uuid, slot: Slot) -> NewAppointment {
    NewAppointment {
        client: BookingClient::Existing(Uuid::new_v4()),
        lawyer_id,
        company_id: None,
        service_id: None,
        slot,
        notes: None,
    }
}

fn local_slot(date: &str, time: &str, minutes: i32) -> Slot {
    let start = booking::local_start(Guayaquil, date, time).unwrap();
    Slot::new(start, minutes).unwrap()
}

#[test]
fn test_local_time_is_resolved_in_firm_zone() {
    // Guayaquil is UTC-5 all year
    let start = booking::local_start(Guayaquil, "2024-02-15", "09:00").unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 15, 14, 0, 0).unwrap());
}

#[rstest]
#[case("09:00")]
#[case("09:00:00")]
#[case(" 09:00 ")]
fn test_time_formats(#[case] time: &str) {
    assert_eq!(
        booking::parse_time(time).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    );
}

#[rstest]
#[case("15/02/2024")]
#[case("2024-13-01")]
#[case("")]
fn test_bad_dates_are_validation_errors(#[case] date: &str) {
    assert!(matches!(
        booking::parse_date(date),
        Err(LexError::Validation(_))
    ));
}

#[test]
fn test_bad_time_is_validation_error() {
    assert!(matches!(
        booking::parse_time("9am"),
        Err(LexError::Validation(_))
    ));
}

#[rstest]
#[case::requested_wins(Some(30), Some(90), 30)]
#[case::service_default(None, Some(90), 90)]
#[case::fallback(None, None, 60)]
fn test_duration_resolution(
    #[case] requested: Option<i32>,
    #[case] service: Option<i32>,
    #[case] expected: i32,
) {
    assert_eq!(booking::resolve_duration(requested, service).unwrap(), expected);
}

#[rstest]
#[case(10)]
#[case(481)]
#[case(0)]
fn test_duration_out_of_range(#[case] minutes: i32) {
    assert!(booking::resolve_duration(Some(minutes), None).is_err());
}

#[test]
fn test_office_window_in_utc() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let window = booking::office_window(
        Guayaquil,
        date,
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    )
    .unwrap();

    assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 2, 15, 13, 0, 0).unwrap());
    assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 2, 15, 23, 0, 0).unwrap());
}

#[rstest]
#[case::at_opening("08:00", 60, true)]
#[case::ends_at_closing("17:00", 60, true)]
#[case::before_opening("03:00", 30, false)]
#[case::runs_past_closing("17:30", 60, false)]
#[case::after_closing("19:00", 30, false)]
fn test_office_hours_are_enforced(#[case] time: &str, #[case] minutes: i32, #[case] ok: bool) {
    let date = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let window = booking::office_window(
        Guayaquil,
        date,
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    )
    .unwrap();
    let slot = local_slot("2024-02-15", time, minutes);

    let result = booking::ensure_office_hours(&window, &slot);
    assert_eq!(result.is_ok(), ok);
    if !ok {
        assert!(matches!(result, Err(LexError::Validation(_))));
    }
}

#[tokio::test]
async fn test_booking_scenario_for_one_lawyer() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();

    let first = booking::place(
        &store,
        BookingScope::Lawyer,
        new_appointment(lawyer, local_slot("2024-02-15", "09:00", 60)),
    )
    .await;
    assert!(first.is_ok());

    let overlapping = booking::place(
        &store,
        BookingScope::Lawyer,
        new_appointment(lawyer, local_slot("2024-02-15", "09:30", 30)),
    )
    .await;
    let err = overlapping.unwrap_err();
    assert!(matches!(err, LexError::Conflict(_)));

    let response = AppError(err).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("horario ya está ocupado"));

    let adjacent = booking::place(
        &store,
        BookingScope::Lawyer,
        new_appointment(lawyer, local_slot("2024-02-15", "10:00", 60)),
    )
    .await;
    assert!(adjacent.is_ok());

    assert_eq!(store.all().await.len(), 2);
}

#[tokio::test]
async fn test_reschedule_refuses_cancelled_appointment() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();
    let row = booking::place(
        &store,
        BookingScope::Lawyer,
        new_appointment(lawyer, local_slot("2024-02-15", "09:00", 60)),
    )
    .await
    .unwrap();

    let mut cancelled = Appointment::try_from(row).unwrap();
    cancelled.status = AppointmentStatus::Cancelled;

    let result = booking::reschedule(
        &store,
        BookingScope::Lawyer,
        &cancelled,
        local_slot("2024-02-15", "11:00", 60),
    )
    .await;
    assert!(matches!(result, Err(LexError::Validation(_))));
}

#[tokio::test]
async fn test_reschedule_into_taken_slot_conflicts() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();
    let first = booking::place(
        &store,
        BookingScope::Lawyer,
        new_appointment(lawyer, local_slot("2024-02-15", "09:00", 60)),
    )
    .await
    .unwrap();
    booking::place(
        &store,
        BookingScope::Lawyer,
        new_appointment(lawyer, local_slot("2024-02-15", "11:00", 60)),
    )
    .await
    .unwrap();

    let first = Appointment::try_from(first).unwrap();
    let result = booking::reschedule(
        &store,
        BookingScope::Lawyer,
        &first,
        local_slot("2024-02-15", "11:30", 60),
    )
    .await;

    assert!(matches!(result, Err(LexError::Conflict(_))));
}
