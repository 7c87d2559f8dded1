use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::LexResult, models::fields};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lawyer {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawyerInput {
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl LawyerInput {
    pub fn validate(&self) -> LexResult<()> {
        fields::require("name", &self.name)?;
        fields::email("email", &self.email)?;
        fields::phone("phone", self.phone.as_deref())
    }
}
