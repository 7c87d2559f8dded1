use chrono::Utc;
use eyre::Result;
use lexcita_core::models::lawyer::LawyerInput;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbLawyer;

pub async fn create_lawyer(pool: &Pool<Postgres>, input: &LawyerInput) -> Result<DbLawyer> {
    let lawyer = sqlx::query_as::<_, DbLawyer>(
        r#"
        INSERT INTO lawyers (id, company_id, name, email, phone, specialty, active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, company_id, name, email, phone, specialty, active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.company_id)
    .bind(input.name.trim())
    .bind(input.email.trim().to_lowercase())
    .bind(input.phone.as_deref())
    .bind(input.specialty.as_deref())
    .bind(input.active)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(lawyer)
}

pub async fn get_lawyer_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbLawyer>> {
    let lawyer = sqlx::query_as::<_, DbLawyer>(
        r#"
        SELECT id, company_id, name, email, phone, specialty, active, created_at
        FROM lawyers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(lawyer)
}

pub async fn list_lawyers(pool: &Pool<Postgres>, only_active: bool) -> Result<Vec<DbLawyer>> {
    let lawyers = sqlx::query_as::<_, DbLawyer>(
        r#"
        SELECT id, company_id, name, email, phone, specialty, active, created_at
        FROM lawyers
        WHERE ($1 = FALSE OR active)
        ORDER BY name ASC
        "#,
    )
    .bind(only_active)
    .fetch_all(pool)
    .await?;

    Ok(lawyers)
}

pub async fn update_lawyer(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &LawyerInput,
) -> Result<Option<DbLawyer>> {
    let lawyer = sqlx::query_as::<_, DbLawyer>(
        r#"
        UPDATE lawyers
        SET company_id = $2, name = $3, email = $4, phone = $5, specialty = $6, active = $7
        WHERE id = $1
        RETURNING id, company_id, name, email, phone, specialty, active, created_at
        "#,
    )
    .bind(id)
    .bind(input.company_id)
    .bind(input.name.trim())
    .bind(input.email.trim().to_lowercase())
    .bind(input.phone.as_deref())
    .bind(input.specialty.as_deref())
    .bind(input.active)
    .fetch_optional(pool)
    .await?;

    Ok(lawyer)
}

pub async fn delete_lawyer(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM lawyers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
