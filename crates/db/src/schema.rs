use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: &[(&str, &str)] = &[
    (
        "companies",
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            ruc VARCHAR(13) NOT NULL UNIQUE,
            email VARCHAR(255) NULL,
            phone VARCHAR(32) NULL,
            address TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "lawyers",
        r#"
        CREATE TABLE IF NOT EXISTS lawyers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            company_id UUID NULL REFERENCES companies(id),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(32) NULL,
            specialty VARCHAR(255) NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "clients",
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(32) NULL,
            cedula VARCHAR(10) NULL UNIQUE,
            company_id UUID NULL REFERENCES companies(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            duration_minutes INTEGER NOT NULL,
            price_cents BIGINT NOT NULL DEFAULT 0,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_service_duration CHECK (duration_minutes BETWEEN 15 AND 480)
        );
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_id UUID NOT NULL REFERENCES clients(id),
            lawyer_id UUID NOT NULL REFERENCES lawyers(id),
            company_id UUID NULL REFERENCES companies(id),
            service_id UUID NULL REFERENCES services(id),
            starts_at TIMESTAMP WITH TIME ZONE NOT NULL,
            ends_at TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_minutes INTEGER NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_appointment_range CHECK (ends_at > starts_at),
            CONSTRAINT valid_appointment_duration CHECK (duration_minutes BETWEEN 15 AND 480),
            CONSTRAINT valid_appointment_status
                CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed'))
        );
        "#,
    ),
    (
        "consultations",
        r#"
        CREATE TABLE IF NOT EXISTS consultations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            client_id UUID NULL REFERENCES clients(id),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NULL,
            practice_area VARCHAR(255) NULL,
            message TEXT NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'new',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_consultation_status CHECK (status IN ('new', 'answered', 'closed'))
        );
        "#,
    ),
    (
        "contact_messages",
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NULL,
            subject VARCHAR(255) NULL,
            message TEXT NOT NULL,
            read BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'client',
            client_id UUID NULL REFERENCES clients(id),
            lawyer_id UUID NULL REFERENCES lawyers(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_user_role CHECK (role IN ('admin', 'lawyer', 'client'))
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_appointments_lawyer_starts \
     ON appointments(lawyer_id, starts_at)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_company_starts \
     ON appointments(company_id, starts_at)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_client_id ON appointments(client_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status)",
    "CREATE INDEX IF NOT EXISTS idx_lawyers_company_id ON lawyers(company_id)",
    "CREATE INDEX IF NOT EXISTS idx_consultations_status ON consultations(status)",
    "CREATE INDEX IF NOT EXISTS idx_contact_messages_read ON contact_messages(read)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, ddl) in TABLES {
        tracing::debug!("Ensuring table {}", table);
        sqlx::query(ddl).execute(pool).await?;
    }

    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
