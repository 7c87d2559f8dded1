pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn sqlstate(err: &eyre::Report) -> Option<String> {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|e| e.code())
        .map(|code| code.into_owned())
}

/// True when the error came from a UNIQUE constraint.
pub fn is_unique_violation(err: &eyre::Report) -> bool {
    sqlstate(err).as_deref() == Some(UNIQUE_VIOLATION)
}

/// True when the error came from a FOREIGN KEY constraint.
pub fn is_foreign_key_violation(err: &eyre::Report) -> bool {
    sqlstate(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}
