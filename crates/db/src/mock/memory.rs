//! A process-local appointment store.
//!
//! The whole check-then-insert runs under one mutex, which gives the same
//! guarantee as the advisory lock in the Postgres store. Contact details are
//! resolved to client ids by email only after the slot check passes.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use eyre::{eyre, Result};
use lexcita_core::{
    models::appointment::{Appointment, AppointmentStatus},
    scheduling::{find_conflict, ResourceKey, Slot},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    models::{BookingClient, DbAppointment, NewAppointment},
    repositories::appointment::{AppointmentStore, Booking},
};

#[derive(Default)]
struct Ledger {
    appointments: Vec<Appointment>,
    clients: HashMap<String, Uuid>,
}

impl Ledger {
    fn client_id(&mut self, client: &BookingClient) -> Uuid {
        match client {
            BookingClient::Existing(id) => *id,
            BookingClient::Contact { email, .. } => *self
                .clients
                .entry(email.trim().to_lowercase())
                .or_insert_with(Uuid::new_v4),
        }
    }
}

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    ledger: Mutex<Ledger>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Appointment> {
        self.ledger.lock().await.appointments.clone()
    }

    /// Client id stored for a contact email, if any booking created one.
    pub async fn client_for(&self, email: &str) -> Option<Uuid> {
        let ledger = self.ledger.lock().await;
        ledger.clients.get(&email.trim().to_lowercase()).copied()
    }

    pub async fn client_count(&self) -> usize {
        self.ledger.lock().await.clients.len()
    }

    /// Sets the status of a stored appointment, returning false if it is unknown.
    pub async fn set_status(&self, id: Uuid, status: AppointmentStatus) -> bool {
        let mut ledger = self.ledger.lock().await;
        match ledger.appointments.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                appointment.status = status;
                appointment.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

fn conflict_on(
    appointments: &[Appointment],
    resource: &ResourceKey,
    slot: &Slot,
    ignore: Option<Uuid>,
) -> Option<Uuid> {
    let on_resource = appointments
        .iter()
        .filter(|a| resource.matches(a.lawyer_id, a.company_id));
    find_conflict(slot, on_resource, ignore).map(|a| a.id)
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn book(&self, resource: ResourceKey, new: NewAppointment) -> Result<Booking> {
        let mut ledger = self.ledger.lock().await;

        if let Some(existing) = conflict_on(&ledger.appointments, &resource, &new.slot, None) {
            return Ok(Booking::Conflict { with: existing });
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            client_id: ledger.client_id(&new.client),
            lawyer_id: new.lawyer_id,
            company_id: new.company_id,
            service_id: new.service_id,
            starts_at: new.slot.start,
            ends_at: new.slot.end,
            duration_minutes: new.slot.duration_minutes() as i32,
            status: AppointmentStatus::Pending,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        ledger.appointments.push(appointment.clone());
        Ok(Booking::Booked(DbAppointment::from(appointment)))
    }

    async fn reschedule(&self, resource: ResourceKey, id: Uuid, slot: Slot) -> Result<Booking> {
        let mut ledger = self.ledger.lock().await;

        if let Some(existing) = conflict_on(&ledger.appointments, &resource, &slot, Some(id)) {
            return Ok(Booking::Conflict { with: existing });
        }

        let appointment = ledger
            .appointments
            .iter_mut()
            .find(|a| a.id == id && a.status.blocks_slot())
            .ok_or_else(|| eyre!("Appointment {} is not open for rescheduling", id))?;
        appointment.starts_at = slot.start;
        appointment.ends_at = slot.end;
        appointment.duration_minutes = slot.duration_minutes() as i32;
        appointment.updated_at = Utc::now();

        Ok(Booking::Booked(DbAppointment::from(appointment.clone())))
    }
}
