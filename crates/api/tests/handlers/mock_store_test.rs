use chrono::{TimeZone, Utc};
use lexcita_api::booking;
use lexcita_core::{
    errors::LexError,
    scheduling::{BookingScope, ResourceKey, Slot, SLOT_TAKEN_MESSAGE},
};
use lexcita_db::{
    mock::repositories::MockAppointmentStore,
    models::{BookingClient, DbAppointment, NewAppointment},
    repositories::appointment::Booking,
};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn new_appointment(lawyer_id: Uuid, company_id: Option<Uuid>) -> NewAppointment {
    NewAppointment {
        client: BookingClient::Existing(Uuid::new_v4()),
        lawyer_id,
        company_id,
        service_id: None,
        slot: Slot::new(Utc.with_ymd_and_hms(2025, 5, 5, 15, 0, 0).unwrap(), 60).unwrap(),
        notes: None,
    }
}

fn stored(new: &NewAppointment) -> DbAppointment {
    let now = Utc::now();
    DbAppointment {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        lawyer_id: new.lawyer_id,
        company_id: new.company_id,
        service_id: new.service_id,
        starts_at: new.slot.start,
        ends_at: new.slot.end,
        duration_minutes: 60,
        status: "pending".to_string(),
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_conflict_from_store_becomes_slot_taken() {
    let lawyer = Uuid::new_v4();
    let mut store = MockAppointmentStore::new();
    store
        .expect_book()
        .times(1)
        .returning(|_, _| Ok(Booking::Conflict { with: Uuid::new_v4() }));

    let result = booking::place(&store, BookingScope::Lawyer, new_appointment(lawyer, None)).await;

    match result {
        Err(LexError::Conflict(message)) => assert_eq!(message, SLOT_TAKEN_MESSAGE),
        other => panic!("expected a conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_booked_row_is_returned() {
    let lawyer = Uuid::new_v4();
    let new = new_appointment(lawyer, None);
    let row = stored(&new);
    let expected_id = row.id;

    let mut store = MockAppointmentStore::new();
    store
        .expect_book()
        .with(eq(ResourceKey::Lawyer(lawyer)), mockall::predicate::always())
        .times(1)
        .returning(move |_, _| Ok(Booking::Booked(row.clone())));

    let booked = booking::place(&store, BookingScope::Lawyer, new).await.unwrap();
    assert_eq!(booked.id, expected_id);
}

#[tokio::test]
async fn test_company_scope_books_against_company() {
    let lawyer = Uuid::new_v4();
    let company = Uuid::new_v4();
    let new = new_appointment(lawyer, Some(company));
    let row = stored(&new);

    let mut store = MockAppointmentStore::new();
    store
        .expect_book()
        .withf(move |resource, _| *resource == ResourceKey::Company(company))
        .times(1)
        .returning(move |_, _| Ok(Booking::Booked(row.clone())));

    assert!(booking::place(&store, BookingScope::Company, new).await.is_ok());
}

#[tokio::test]
async fn test_store_failure_is_a_database_error() {
    let mut store = MockAppointmentStore::new();
    store
        .expect_book()
        .returning(|_, _| Err(eyre::eyre!("connection refused")));

    let request = new_appointment(Uuid::new_v4(), None);
    let result = booking::place(&store, BookingScope::Lawyer, request).await;

    assert!(matches!(result, Err(LexError::Database(_))));
}
