use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    models::fields,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Statuses that hold a slot on the resource's calendar.
    pub const BLOCKING: [AppointmentStatus; 2] =
        [AppointmentStatus::Pending, AppointmentStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    pub fn blocks_slot(&self) -> bool {
        Self::BLOCKING.contains(self)
    }

    /// pending -> confirmed -> completed, and anything still open -> cancelled.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Completed, Cancelled)
        )
    }

    pub fn ensure_transition(&self, next: AppointmentStatus) -> LexResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(LexError::Validation(format!(
                "No se puede cambiar el estado de '{}' a '{}'",
                self, next
            )))
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(LexError::Validation(format!(
                "Estado de cita desconocido: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub company_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Appointment joined with the names a listing needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client_name: String,
    pub client_email: String,
    pub lawyer_name: String,
    pub service_name: Option<String>,
}

/// Booking request sent by the appointment wizard. Date and time are local
/// to the firm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub service_id: Option<Uuid>,
    pub lawyer_id: Uuid,
    pub date: String,
    pub time: String,
    pub duration: Option<i32>,
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    /// Checks the contact fields. Date, time and duration are checked when
    /// they are resolved against the firm's calendar.
    pub fn validate(&self) -> LexResult<()> {
        fields::require("client_name", &self.client_name)?;
        fields::email("client_email", &self.client_email)?;
        fields::phone("client_phone", self.client_phone.as_deref())?;
        fields::require("date", &self.date)?;
        fields::require("time", &self.time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub date: String,
    pub time: String,
    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub lawyer_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub starts_at: DateTime<Utc>,
    pub local_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub success: bool,
    pub lawyer_id: Uuid,
    pub date: String,
    pub duration_minutes: i32,
    pub slots: Vec<AvailableSlot>,
}
