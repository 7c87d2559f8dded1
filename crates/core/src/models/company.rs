use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    identity,
    models::fields,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub ruc: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    pub ruc: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CompanyInput {
    pub fn validate(&self) -> LexResult<()> {
        fields::require("name", &self.name)?;
        if !identity::is_valid_ruc(self.ruc.trim()) {
            return Err(LexError::Validation("El RUC no es válido".to_string()));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            fields::email("email", email)?;
        }
        fields::phone("phone", self.phone.as_deref())
    }
}
