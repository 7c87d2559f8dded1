use chrono::{DateTime, Utc};
use eyre::Report;
use lexcita_core::{
    models::{
        appointment::{Appointment, AppointmentDetail},
        client::Client,
        company::Company,
        consultation::Consultation,
        contact::ContactMessage,
        lawyer::Lawyer,
        service::LegalService,
        user::User,
    },
    scheduling::Slot,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCompany {
    pub id: Uuid,
    pub name: String,
    pub ruc: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cedula: Option<String>,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLawyer {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub company_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub appointment: DbAppointment,
    pub client_name: String,
    pub client_email: String,
    pub lawyer_name: String,
    pub service_name: Option<String>,
}

/// Who a new booking is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingClient {
    Existing(Uuid),
    /// Found or created by email once the slot is known to be free, so a
    /// rejected booking leaves no client row behind.
    Contact {
        name: String,
        email: String,
        phone: Option<String>,
    },
}

/// Values for a new booking. The slot carries start, end and duration.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client: BookingClient,
    pub lawyer_id: Uuid,
    pub company_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub slot: Slot,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbConsultation {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub practice_area: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Conversions into domain models

impl From<DbCompany> for Company {
    fn from(row: DbCompany) -> Self {
        Company {
            id: row.id,
            name: row.name,
            ruc: row.ruc,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

impl From<DbClient> for Client {
    fn from(row: DbClient) -> Self {
        Client {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            cedula: row.cedula,
            company_id: row.company_id,
            created_at: row.created_at,
        }
    }
}

impl From<DbLawyer> for Lawyer {
    fn from(row: DbLawyer) -> Self {
        Lawyer {
            id: row.id,
            company_id: row.company_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            specialty: row.specialty,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl From<DbService> for LegalService {
    fn from(row: DbService) -> Self {
        LegalService {
            id: row.id,
            name: row.name,
            description: row.description,
            duration_minutes: row.duration_minutes,
            price_cents: row.price_cents,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            client_id: row.client_id,
            lawyer_id: row.lawyer_id,
            company_id: row.company_id,
            service_id: row.service_id,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            duration_minutes: row.duration_minutes,
            status: row.status.parse()?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<Appointment> for DbAppointment {
    fn from(appt: Appointment) -> Self {
        DbAppointment {
            id: appt.id,
            client_id: appt.client_id,
            lawyer_id: appt.lawyer_id,
            company_id: appt.company_id,
            service_id: appt.service_id,
            starts_at: appt.starts_at,
            ends_at: appt.ends_at,
            duration_minutes: appt.duration_minutes,
            status: appt.status.as_str().to_string(),
            notes: appt.notes,
            created_at: appt.created_at,
            updated_at: appt.updated_at,
        }
    }
}

impl TryFrom<DbAppointmentDetail> for AppointmentDetail {
    type Error = Report;

    fn try_from(row: DbAppointmentDetail) -> Result<Self, Self::Error> {
        Ok(AppointmentDetail {
            appointment: row.appointment.try_into()?,
            client_name: row.client_name,
            client_email: row.client_email,
            lawyer_name: row.lawyer_name,
            service_name: row.service_name,
        })
    }
}

impl TryFrom<DbConsultation> for Consultation {
    type Error = Report;

    fn try_from(row: DbConsultation) -> Result<Self, Self::Error> {
        Ok(Consultation {
            id: row.id,
            client_id: row.client_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            practice_area: row.practice_area,
            message: row.message,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

impl From<DbContactMessage> for ContactMessage {
    fn from(row: DbContactMessage) -> Self {
        ContactMessage {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbUser> for User {
    type Error = Report;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse()?,
            client_id: row.client_id,
            lawyer_id: row.lawyer_id,
            created_at: row.created_at,
        })
    }
}

/// Converts a batch of rows, failing on the first malformed one.
pub fn convert_all<R, M>(rows: Vec<R>) -> eyre::Result<Vec<M>>
where
    M: TryFrom<R, Error = Report>,
{
    rows.into_iter().map(M::try_from).collect()
}
