use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    identity,
    models::{client::ClientInput, fields},
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Lawyer,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Lawyer => "lawyer",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "lawyer" => Ok(Role::Lawyer),
            "client" => Ok(Role::Client),
            other => Err(LexError::Validation(format!("Rol desconocido: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub cedula: Option<String>,
}

impl RegisterRequest {
    /// The cédula, if one was given.
    pub fn cedula(&self) -> Option<&str> {
        self.cedula.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// The client record to create for a registrant with no prior bookings.
    pub fn client_input(&self) -> ClientInput {
        ClientInput {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: fields::normalize(self.phone.clone()),
            cedula: self.cedula().map(str::to_string),
            company_id: None,
        }
    }

    pub fn validate(&self) -> LexResult<()> {
        fields::require("name", &self.name)?;
        fields::email("email", &self.email)?;
        fields::phone("phone", self.phone.as_deref())?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(LexError::Validation(format!(
                "La contraseña debe tener al menos {} caracteres",
                MIN_PASSWORD_LENGTH
            )));
        }
        if let Some(cedula) = self.cedula.as_deref().filter(|c| !c.trim().is_empty()) {
            if !identity::is_valid_cedula(cedula.trim()) {
                return Err(LexError::Validation("La cédula no es válida".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub user: Option<User>,
}
