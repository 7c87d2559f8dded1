use chrono::Utc;
use eyre::Result;
use lexcita_core::models::client::ClientInput;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

use crate::models::DbClient;

pub async fn create_client(pool: &Pool<Postgres>, input: &ClientInput) -> Result<DbClient> {
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        INSERT INTO clients (id, name, email, phone, cedula, company_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, email, phone, cedula, company_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.email.trim().to_lowercase())
    .bind(input.phone.as_deref())
    .bind(input.cedula.as_deref().map(str::trim).filter(|c| !c.is_empty()))
    .bind(input.company_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(client)
}

/// Returns the client registered under `email`, creating it on first use.
///
/// Existing records keep their name; a missing phone is filled in. Runs on a
/// pool or inside an open transaction.
pub async fn find_or_create_client<'e, E>(
    executor: E,
    name: &str,
    email: &str,
    phone: Option<&str>,
) -> Result<DbClient>
where
    E: Executor<'e, Database = Postgres>,
{
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        INSERT INTO clients (id, name, email, phone, created_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email)
        DO UPDATE SET phone = COALESCE(clients.phone, EXCLUDED.phone)
        RETURNING id, name, email, phone, cedula, company_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name.trim())
    .bind(email.trim().to_lowercase())
    .bind(phone)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(client)
}

pub async fn get_client_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        SELECT id, name, email, phone, cedula, company_id, created_at
        FROM clients
        WHERE email = $1
        "#,
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn get_client_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        SELECT id, name, email, phone, cedula, company_id, created_at
        FROM clients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn list_clients(pool: &Pool<Postgres>) -> Result<Vec<DbClient>> {
    let clients = sqlx::query_as::<_, DbClient>(
        r#"
        SELECT id, name, email, phone, cedula, company_id, created_at
        FROM clients
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

pub async fn update_client(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &ClientInput,
) -> Result<Option<DbClient>> {
    let client = sqlx::query_as::<_, DbClient>(
        r#"
        UPDATE clients
        SET name = $2, email = $3, phone = $4, cedula = $5, company_id = $6
        WHERE id = $1
        RETURNING id, name, email, phone, cedula, company_id, created_at
        "#,
    )
    .bind(id)
    .bind(input.name.trim())
    .bind(input.email.trim().to_lowercase())
    .bind(input.phone.as_deref())
    .bind(input.cedula.as_deref().map(str::trim).filter(|c| !c.is_empty()))
    .bind(input.company_id)
    .fetch_optional(pool)
    .await?;

    Ok(client)
}

pub async fn delete_client(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
