use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{LexError, LexResult},
    models::fields,
    scheduling,
};

/// A legal service offered by the firm (e.g. "Divorcio consensual").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalService {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ServiceInput {
    pub fn validate(&self) -> LexResult<()> {
        fields::require("name", &self.name)?;
        scheduling::validate_duration(self.duration_minutes)?;
        if self.price_cents < 0 {
            return Err(LexError::Validation("El precio no puede ser negativo".to_string()));
        }
        Ok(())
    }
}
