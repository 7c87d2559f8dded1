//! Appointment persistence.
//!
//! Booking and rescheduling run check-then-write inside one transaction that
//! first takes `pg_advisory_xact_lock` on the resource key. Concurrent
//! requests for the same lawyer (or company) queue on that lock, so the
//! overlap check always sees every committed booking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use lexcita_core::{
    models::appointment::{AppointmentFilter, AppointmentStatus},
    scheduling::{ResourceKey, Slot},
};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::{
    models::{BookingClient, DbAppointment, DbAppointmentDetail, NewAppointment},
    repositories::client,
};

const COLUMNS: &str = "id, client_id, lawyer_id, company_id, service_id, starts_at, ends_at, \
                       duration_minutes, status, notes, created_at, updated_at";

const DETAIL_SELECT: &str = r#"
    SELECT a.id, a.client_id, a.lawyer_id, a.company_id, a.service_id, a.starts_at, a.ends_at,
           a.duration_minutes, a.status, a.notes, a.created_at, a.updated_at,
           c.name AS client_name, c.email AS client_email,
           l.name AS lawyer_name, s.name AS service_name
    FROM appointments a
    JOIN clients c ON c.id = a.client_id
    JOIN lawyers l ON l.id = a.lawyer_id
    LEFT JOIN services s ON s.id = a.service_id
"#;

/// Outcome of an attempt to place an appointment on a calendar.
#[derive(Debug, Clone)]
pub enum Booking {
    Booked(DbAppointment),
    Conflict { with: Uuid },
}

/// Writes that must be atomic with the overlap check.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn book(&self, resource: ResourceKey, new: NewAppointment) -> Result<Booking>;

    async fn reschedule(&self, resource: ResourceKey, id: Uuid, slot: Slot) -> Result<Booking>;
}

pub struct PgAppointmentStore {
    pool: Pool<Postgres>,
}

impl PgAppointmentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn blocking_statuses() -> Vec<String> {
    AppointmentStatus::BLOCKING
        .iter()
        .map(|s| s.as_str().to_string())
        .collect()
}

fn resource_column(resource: &ResourceKey) -> &'static str {
    match resource {
        ResourceKey::Lawyer(_) => "lawyer_id",
        ResourceKey::Company(_) => "company_id",
    }
}

async fn lock_resource(conn: &mut PgConnection, resource: &ResourceKey) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(resource.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// `existing.start < proposed.end AND existing.end > proposed.start`
async fn find_overlapping(
    conn: &mut PgConnection,
    resource: &ResourceKey,
    slot: &Slot,
    ignore: Option<Uuid>,
) -> Result<Option<Uuid>> {
    let sql = format!(
        r#"
        SELECT id
        FROM appointments
        WHERE {} = $1
          AND status = ANY($2)
          AND starts_at < $3
          AND ends_at > $4
          AND ($5::uuid IS NULL OR id <> $5)
        LIMIT 1
        "#,
        resource_column(resource)
    );

    let conflict = sqlx::query_scalar::<_, Uuid>(&sql)
        .bind(resource.id())
        .bind(blocking_statuses())
        .bind(slot.end)
        .bind(slot.start)
        .bind(ignore)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(conflict)
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn book(&self, resource: ResourceKey, new: NewAppointment) -> Result<Booking> {
        let mut tx = self.pool.begin().await?;
        lock_resource(&mut tx, &resource).await?;

        if let Some(existing) = find_overlapping(&mut tx, &resource, &new.slot, None).await? {
            tx.rollback().await?;
            tracing::debug!("Slot on {} taken by appointment {}", resource, existing);
            return Ok(Booking::Conflict { with: existing });
        }

        let client_id = match &new.client {
            BookingClient::Existing(id) => *id,
            BookingClient::Contact { name, email, phone } => {
                client::find_or_create_client(&mut *tx, name, email, phone.as_deref())
                    .await?
                    .id
            }
        };

        let id = Uuid::new_v4();
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO appointments ({COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {COLUMNS}
            "#
        );
        let appointment = sqlx::query_as::<_, DbAppointment>(&sql)
            .bind(id)
            .bind(client_id)
            .bind(new.lawyer_id)
            .bind(new.company_id)
            .bind(new.service_id)
            .bind(new.slot.start)
            .bind(new.slot.end)
            .bind(new.slot.duration_minutes() as i32)
            .bind(AppointmentStatus::Pending.as_str())
            .bind(new.notes)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!("Booked appointment {} on {}", appointment.id, resource);
        Ok(Booking::Booked(appointment))
    }

    async fn reschedule(&self, resource: ResourceKey, id: Uuid, slot: Slot) -> Result<Booking> {
        let mut tx = self.pool.begin().await?;
        lock_resource(&mut tx, &resource).await?;

        if let Some(existing) = find_overlapping(&mut tx, &resource, &slot, Some(id)).await? {
            tx.rollback().await?;
            return Ok(Booking::Conflict { with: existing });
        }

        let sql = format!(
            r#"
            UPDATE appointments
            SET starts_at = $2, ends_at = $3, duration_minutes = $4, updated_at = $5
            WHERE id = $1 AND status = ANY($6)
            RETURNING {COLUMNS}
            "#
        );
        let appointment = sqlx::query_as::<_, DbAppointment>(&sql)
            .bind(id)
            .bind(slot.start)
            .bind(slot.end)
            .bind(slot.duration_minutes() as i32)
            .bind(Utc::now())
            .bind(blocking_statuses())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| eyre!("Appointment {} is not open for rescheduling", id))?;

        tx.commit().await?;
        Ok(Booking::Booked(appointment))
    }
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointment_detail(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointmentDetail>> {
    let detail = sqlx::query_as::<_, DbAppointmentDetail>(&format!(
        "{DETAIL_SELECT} WHERE a.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(detail)
}

pub async fn list_appointment_details(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointmentDetail>> {
    let details = sqlx::query_as::<_, DbAppointmentDetail>(&format!(
        r#"
        {DETAIL_SELECT}
        WHERE ($1::text IS NULL OR a.status = $1)
          AND ($2::uuid IS NULL OR a.lawyer_id = $2)
          AND ($3::uuid IS NULL OR a.client_id = $3)
        ORDER BY a.starts_at ASC
        "#
    ))
    .bind(filter.status.map(|s| s.as_str()))
    .bind(filter.lawyer_id)
    .bind(filter.client_id)
    .fetch_all(pool)
    .await?;

    Ok(details)
}

/// Blocking appointments on a resource that intersect `[from, to)`.
pub async fn list_blocking_between(
    pool: &Pool<Postgres>,
    resource: &ResourceKey,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let sql = format!(
        r#"
        SELECT {COLUMNS}
        FROM appointments
        WHERE {} = $1
          AND status = ANY($2)
          AND starts_at < $3
          AND ends_at > $4
        ORDER BY starts_at ASC
        "#,
        resource_column(resource)
    );

    let appointments = sqlx::query_as::<_, DbAppointment>(&sql)
        .bind(resource.id())
        .bind(blocking_statuses())
        .bind(to)
        .bind(from)
        .fetch_all(pool)
        .await?;

    Ok(appointments)
}

/// Moves an appointment from `expected` to `next`.
///
/// Returns `None` when the row is gone or its status changed in between.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: AppointmentStatus,
    next: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $3, updated_at = $4
        WHERE id = $1 AND status = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(expected.as_str())
    .bind(next.as_str())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
