use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    models::fields,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    New,
    Answered,
    Closed,
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::New => "new",
            ConsultationStatus::Answered => "answered",
            ConsultationStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsultationStatus {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ConsultationStatus::New),
            "answered" => Ok(ConsultationStatus::Answered),
            "closed" => Ok(ConsultationStatus::Closed),
            other => Err(LexError::Validation(format!(
                "Estado de consulta desconocido: {}",
                other
            ))),
        }
    }
}

/// A legal question submitted through the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub practice_area: Option<String>,
    pub message: String,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub practice_area: Option<String>,
    pub message: String,
}

impl ConsultationInput {
    pub fn validate(&self) -> LexResult<()> {
        fields::require("name", &self.name)?;
        fields::email("email", &self.email)?;
        fields::phone("phone", self.phone.as_deref())?;
        fields::require("message", &self.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConsultationStatusRequest {
    pub status: ConsultationStatus,
}
