use chrono::Utc;
use eyre::Result;
use lexcita_core::models::contact::ContactInput;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbContactMessage;

pub async fn create_contact_message(
    pool: &Pool<Postgres>,
    input: &ContactInput,
) -> Result<DbContactMessage> {
    let message = sqlx::query_as::<_, DbContactMessage>(
        r#"
        INSERT INTO contact_messages (id, name, email, phone, subject, message, read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
        RETURNING id, name, email, phone, subject, message, read, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.email.trim().to_lowercase())
    .bind(input.phone.as_deref())
    .bind(input.subject.as_deref())
    .bind(input.message.trim())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(message)
}

pub async fn get_contact_message_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbContactMessage>> {
    let message = sqlx::query_as::<_, DbContactMessage>(
        r#"
        SELECT id, name, email, phone, subject, message, read, created_at
        FROM contact_messages
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}

pub async fn list_contact_messages(
    pool: &Pool<Postgres>,
    unread_only: bool,
) -> Result<Vec<DbContactMessage>> {
    let messages = sqlx::query_as::<_, DbContactMessage>(
        r#"
        SELECT id, name, email, phone, subject, message, read, created_at
        FROM contact_messages
        WHERE ($1 = FALSE OR read = FALSE)
        ORDER BY created_at DESC
        "#,
    )
    .bind(unread_only)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

pub async fn mark_contact_message_read(
    pool: &Pool<Postgres>,
    id: Uuid,
    read: bool,
) -> Result<Option<DbContactMessage>> {
    let message = sqlx::query_as::<_, DbContactMessage>(
        r#"
        UPDATE contact_messages
        SET read = $2
        WHERE id = $1
        RETURNING id, name, email, phone, subject, message, read, created_at
        "#,
    )
    .bind(id)
    .bind(read)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}
