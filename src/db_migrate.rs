use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use lexcita_api::middleware::auth::hash_password;
use lexcita_core::models::{fields, user::MIN_PASSWORD_LENGTH};
use lexcita_db::{repositories::user::ensure_admin, schema::initialize_database};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| eyre!("DATABASE_URL environment variable must be set"))?;

    info!("Connecting to database...");
    let db_pool = lexcita_db::create_pool(&database_url).await?;

    initialize_database(&db_pool).await?;

    // Seed the first administrator when credentials are provided
    match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
        (Ok(email), Ok(password)) => {
            if !fields::is_email(&email) {
                return Err(eyre!("ADMIN_EMAIL is not a valid email address"));
            }
            if password.chars().count() < MIN_PASSWORD_LENGTH {
                return Err(eyre!(
                    "ADMIN_PASSWORD must be at least {} characters",
                    MIN_PASSWORD_LENGTH
                ));
            }

            let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".to_string());
            let password_hash = hash_password(&password)?;
            if ensure_admin(&db_pool, &name, &email, &password_hash).await? {
                info!("Created admin account {}", email);
            } else {
                info!("Admin account {} already exists", email);
            }
        }
        _ => info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin seed"),
    }

    Ok(())
}
