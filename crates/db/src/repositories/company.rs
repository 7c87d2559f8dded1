use chrono::Utc;
use eyre::Result;
use lexcita_core::models::company::CompanyInput;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbCompany;

pub async fn create_company(pool: &Pool<Postgres>, input: &CompanyInput) -> Result<DbCompany> {
    let company = sqlx::query_as::<_, DbCompany>(
        r#"
        INSERT INTO companies (id, name, ruc, email, phone, address, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, ruc, email, phone, address, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.ruc.trim())
    .bind(input.email.as_deref().map(|e| e.trim().to_lowercase()))
    .bind(input.phone.as_deref())
    .bind(input.address.as_deref())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(company)
}

pub async fn get_company_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCompany>> {
    let company = sqlx::query_as::<_, DbCompany>(
        r#"
        SELECT id, name, ruc, email, phone, address, created_at
        FROM companies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(company)
}

pub async fn list_companies(pool: &Pool<Postgres>) -> Result<Vec<DbCompany>> {
    let companies = sqlx::query_as::<_, DbCompany>(
        r#"
        SELECT id, name, ruc, email, phone, address, created_at
        FROM companies
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(companies)
}

pub async fn update_company(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &CompanyInput,
) -> Result<Option<DbCompany>> {
    let company = sqlx::query_as::<_, DbCompany>(
        r#"
        UPDATE companies
        SET name = $2, ruc = $3, email = $4, phone = $5, address = $6
        WHERE id = $1
        RETURNING id, name, ruc, email, phone, address, created_at
        "#,
    )
    .bind(id)
    .bind(input.name.trim())
    .bind(input.ruc.trim())
    .bind(input.email.as_deref().map(|e| e.trim().to_lowercase()))
    .bind(input.phone.as_deref())
    .bind(input.address.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(company)
}

pub async fn delete_company(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM companies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
