use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use fake::{faker::lorem::en::Sentence, Fake};
use lexcita_core::{
    models::appointment::{Appointment, AppointmentStatus},
    scheduling::{BookingScope, ResourceKey, Slot},
};
use lexcita_db::{
    mock::memory::InMemoryAppointmentStore,
    models::{BookingClient, NewAppointment},
    repositories::appointment::{AppointmentStore, Booking},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
}

fn request(
    lawyer_id: Uuid,
    company_id: Option<Uuid>,
    start: DateTime<Utc>,
    minutes: i32,
) -> NewAppointment {
    NewAppointment {
        client: BookingClient::Existing(Uuid::new_v4()),
        lawyer_id,
        company_id,
        service_id: None,
        slot: Slot::new(start, minutes).unwrap(),
        notes: Some(Sentence(3..6).fake()),
    }
}

async fn book(store: &InMemoryAppointmentStore, new: NewAppointment) -> Booking {
    let resource = BookingScope::Lawyer.resource_for(new.lawyer_id, new.company_id);
    store.book(resource, new).await.unwrap()
}

fn booked_id(booking: &Booking) -> Uuid {
    match booking {
        Booking::Booked(row) => row.id,
        Booking::Conflict { with } => panic!("expected a booking, conflicted with {}", with),
    }
}

#[tokio::test]
async fn test_book_stores_pending_appointment() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();

    let booking = book(&store, request(lawyer, None, at(14, 0), 60)).await;

    let id = booked_id(&booking);
    let stored = store.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].status, AppointmentStatus::Pending);
    assert_eq!(stored[0].ends_at, at(15, 0));
    assert_eq!(stored[0].duration_minutes, 60);
}

#[rstest]
#[case::same_start(14, 0, 60, false)]
#[case::starts_inside(14, 30, 60, false)]
#[case::wraps_existing(13, 30, 120, false)]
#[case::touches_end(15, 0, 60, true)]
#[case::touches_start(13, 0, 60, true)]
#[tokio::test]
async fn test_second_booking_against_fourteen_to_fifteen(
    #[case] hour: u32,
    #[case] minute: u32,
    #[case] minutes: i32,
    #[case] accepted: bool,
) {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();
    let first = booked_id(&book(&store, request(lawyer, None, at(14, 0), 60)).await);

    let second = book(&store, request(lawyer, None, at(hour, minute), minutes)).await;

    match second {
        Booking::Booked(_) => assert!(accepted),
        Booking::Conflict { with } => {
            assert!(!accepted);
            assert_eq!(with, first);
        }
    }
}

#[tokio::test]
async fn test_other_lawyer_is_independent() {
    let store = InMemoryAppointmentStore::new();

    book(&store, request(Uuid::new_v4(), None, at(14, 0), 60)).await;
    let other = book(&store, request(Uuid::new_v4(), None, at(14, 0), 60)).await;

    assert!(matches!(other, Booking::Booked(_)));
}

#[tokio::test]
async fn test_cancelled_appointment_frees_slot() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();
    let first = booked_id(&book(&store, request(lawyer, None, at(9, 0), 60)).await);

    assert!(store.set_status(first, AppointmentStatus::Cancelled).await);
    let again = book(&store, request(lawyer, None, at(9, 0), 60)).await;

    assert!(matches!(again, Booking::Booked(_)));
}

#[tokio::test]
async fn test_company_scope_blocks_colleagues() {
    let store = InMemoryAppointmentStore::new();
    let company = Uuid::new_v4();
    let first = request(Uuid::new_v4(), Some(company), at(10, 0), 60);
    let colleague = request(Uuid::new_v4(), Some(company), at(10, 30), 30);

    let resource = BookingScope::Company.resource_for(first.lawyer_id, first.company_id);
    assert_eq!(resource, ResourceKey::Company(company));
    store.book(resource, first).await.unwrap();
    let second = store.book(resource, colleague).await.unwrap();

    assert!(matches!(second, Booking::Conflict { .. }));
}

#[tokio::test]
async fn test_concurrent_requests_for_same_slot_book_once() {
    let store = Arc::new(InMemoryAppointmentStore::new());
    let lawyer = Uuid::new_v4();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .book(ResourceKey::Lawyer(lawyer), request(lawyer, None, at(11, 0), 60))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut booked = 0;
    for handle in handles {
        if let Booking::Booked(_) = handle.await.unwrap() {
            booked += 1;
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(store.all().await.len(), 1);
}

#[tokio::test]
async fn test_reschedule_ignores_itself_but_not_others() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();
    let resource = ResourceKey::Lawyer(lawyer);
    let first = booked_id(&book(&store, request(lawyer, None, at(9, 0), 60)).await);
    let second = booked_id(&book(&store, request(lawyer, None, at(11, 0), 60)).await);

    let shifted = store
        .reschedule(resource, first, Slot::new(at(9, 30), 60).unwrap())
        .await
        .unwrap();
    assert!(matches!(shifted, Booking::Booked(_)));

    let clash = store
        .reschedule(resource, first, Slot::new(at(10, 30), 60).unwrap())
        .await
        .unwrap();
    match clash {
        Booking::Conflict { with } => assert_eq!(with, second),
        Booking::Booked(_) => panic!("expected a conflict"),
    }

    let stored: Vec<Appointment> = store.all().await;
    let moved = stored.iter().find(|a| a.id == first).unwrap();
    assert_eq!(moved.starts_at, at(9, 30));
}

#[tokio::test]
async fn test_reschedule_rejects_closed_appointment() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();
    let id = booked_id(&book(&store, request(lawyer, None, at(9, 0), 60)).await);
    store.set_status(id, AppointmentStatus::Completed).await;

    let result = store
        .reschedule(ResourceKey::Lawyer(lawyer), id, Slot::new(at(16, 0), 60).unwrap())
        .await;

    assert!(result.is_err());
}

fn contact(email: &str) -> BookingClient {
    BookingClient::Contact {
        name: "Ana Torres".to_string(),
        email: email.to_string(),
        phone: None,
    }
}

#[tokio::test]
async fn test_rejected_booking_creates_no_client() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();

    let mut first = request(lawyer, None, at(14, 0), 60);
    first.client = contact("ana@example.com");
    booked_id(&book(&store, first).await);

    let mut clash = request(lawyer, None, at(14, 30), 30);
    clash.client = contact("luis@example.com");
    let outcome = book(&store, clash).await;

    assert!(matches!(outcome, Booking::Conflict { .. }));
    assert_eq!(store.client_count().await, 1);
    assert_eq!(store.client_for("luis@example.com").await, None);
}

#[tokio::test]
async fn test_contact_bookings_share_a_client_by_email() {
    let store = InMemoryAppointmentStore::new();
    let lawyer = Uuid::new_v4();

    let mut morning = request(lawyer, None, at(14, 0), 60);
    morning.client = contact("ana@example.com");
    book(&store, morning).await;

    let mut afternoon = request(lawyer, None, at(16, 0), 60);
    afternoon.client = contact("  ANA@example.com ");
    book(&store, afternoon).await;

    let client_id = store.client_for("ana@example.com").await.unwrap();
    let appointments = store.all().await;
    assert_eq!(appointments.len(), 2);
    assert!(appointments.iter().all(|a| a.client_id == client_id));
    assert_eq!(store.client_count().await, 1);
}
