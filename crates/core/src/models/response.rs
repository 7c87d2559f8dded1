//! Success envelopes. Errors are rendered as `{"error": ...}` by the API layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub success: bool,
    pub id: Uuid,
}

impl Created {
    pub fn new(id: Uuid) -> Self {
        Self { success: true, id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Single<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Single<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    pub success: bool,
    pub total: usize,
    pub data: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
