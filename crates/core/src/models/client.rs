use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    identity,
    models::fields,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cedula: Option<String>,
    pub company_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Whether a new account presenting `cedula` may take over this record.
    ///
    /// Records are created from anonymous bookings, so the email alone proves
    /// nothing; the stored cédula must be present and match.
    pub fn is_claimed_by(&self, cedula: Option<&str>) -> bool {
        match (self.cedula.as_deref().map(str::trim), cedula.map(str::trim)) {
            (Some(stored), Some(given)) => !stored.is_empty() && stored == given,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cedula: Option<String>,
    pub company_id: Option<Uuid>,
}

impl ClientInput {
    pub fn validate(&self) -> LexResult<()> {
        fields::require("name", &self.name)?;
        fields::email("email", &self.email)?;
        fields::phone("phone", self.phone.as_deref())?;
        if let Some(cedula) = self.cedula.as_deref().filter(|c| !c.trim().is_empty()) {
            if !identity::is_valid_cedula(cedula.trim()) {
                return Err(LexError::Validation("La cédula no es válida".to_string()));
            }
        }
        Ok(())
    }
}
