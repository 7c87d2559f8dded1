use chrono::Utc;
use eyre::Result;
use lexcita_core::models::user::Role;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbUser;

/// Account fields for a new login. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
}

pub async fn create_user(pool: &Pool<Postgres>, user: NewUser<'_>) -> Result<DbUser> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, client_id, lawyer_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, email, password_hash, role, client_id, lawyer_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.name.trim())
    .bind(user.email.trim().to_lowercase())
    .bind(user.password_hash)
    .bind(user.role.as_str())
    .bind(user.client_id)
    .bind(user.lawyer_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Inserts an admin account unless one with the same email exists.
///
/// Returns `true` when a row was written.
pub async fn ensure_admin(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email.trim().to_lowercase())
    .bind(password_hash)
    .bind(Role::Admin.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, client_id, lawyer_id, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, client_id, lawyer_id, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
