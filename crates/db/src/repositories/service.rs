use chrono::Utc;
use eyre::Result;
use lexcita_core::models::service::ServiceInput;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbService;

pub async fn create_service(pool: &Pool<Postgres>, input: &ServiceInput) -> Result<DbService> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services
            (id, name, description, duration_minutes, price_cents, active, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, description, duration_minutes, price_cents, active, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.description.as_deref())
    .bind(input.duration_minutes)
    .bind(input.price_cents)
    .bind(input.active)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, duration_minutes, price_cents, active, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services(pool: &Pool<Postgres>, only_active: bool) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, duration_minutes, price_cents, active, created_at
        FROM services
        WHERE ($1 = FALSE OR active)
        ORDER BY name ASC
        "#,
    )
    .bind(only_active)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &ServiceInput,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = $2, description = $3, duration_minutes = $4, price_cents = $5, active = $6
        WHERE id = $1
        RETURNING id, name, description, duration_minutes, price_cents, active, created_at
        "#,
    )
    .bind(id)
    .bind(input.name.trim())
    .bind(input.description.as_deref())
    .bind(input.duration_minutes)
    .bind(input.price_cents)
    .bind(input.active)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
