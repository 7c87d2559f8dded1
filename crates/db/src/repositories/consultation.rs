use chrono::Utc;
use eyre::Result;
use lexcita_core::models::consultation::{ConsultationInput, ConsultationStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbConsultation;

/// Stores a consultation, linking it to the client with the same email if one exists.
pub async fn create_consultation(
    pool: &Pool<Postgres>,
    input: &ConsultationInput,
) -> Result<DbConsultation> {
    let consultation = sqlx::query_as::<_, DbConsultation>(
        r#"
        INSERT INTO consultations
            (id, client_id, name, email, phone, practice_area, message, status, created_at)
        VALUES ($1, (SELECT id FROM clients WHERE email = $3), $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, client_id, name, email, phone, practice_area, message, status, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.email.trim().to_lowercase())
    .bind(input.phone.as_deref())
    .bind(input.practice_area.as_deref())
    .bind(input.message.trim())
    .bind(ConsultationStatus::New.as_str())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    tracing::debug!("Stored consultation {}", consultation.id);
    Ok(consultation)
}

pub async fn get_consultation_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbConsultation>> {
    let consultation = sqlx::query_as::<_, DbConsultation>(
        r#"
        SELECT id, client_id, name, email, phone, practice_area, message, status, created_at
        FROM consultations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(consultation)
}

pub async fn list_consultations(
    pool: &Pool<Postgres>,
    status: Option<ConsultationStatus>,
) -> Result<Vec<DbConsultation>> {
    let consultations = sqlx::query_as::<_, DbConsultation>(
        r#"
        SELECT id, client_id, name, email, phone, practice_area, message, status, created_at
        FROM consultations
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY created_at DESC
        "#,
    )
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;

    Ok(consultations)
}

pub async fn update_consultation_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: ConsultationStatus,
) -> Result<Option<DbConsultation>> {
    let consultation = sqlx::query_as::<_, DbConsultation>(
        r#"
        UPDATE consultations
        SET status = $2
        WHERE id = $1
        RETURNING id, client_id, name, email, phone, practice_area, message, status, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(consultation)
}
