//! # API Configuration Module
//!
//! Loads configuration for the Lexcita API server from environment variables,
//! with defaults where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `SESSION_SECRET`: Key used to sign session tokens (required, at least 32 bytes)
//! - `SESSION_TTL_HOURS`: Token lifetime, 1 to 720 (default: 24)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `FIRM_TIMEZONE`: IANA zone appointment dates are entered in (default: "America/Guayaquil")
//! - `BOOKING_SCOPE`: `lawyer` or `company` (default: "lawyer")
//! - `OFFICE_OPENS` / `OFFICE_CLOSES`: Bookable window per day (default: "08:00" / "18:00")
//! - `SLOT_STEP_MINUTES`: Grid for the availability lookup (default: 30)
//! - `CALENDAR_DOMAIN`: Right-hand side of exported event UIDs (default: "lexcita.local")

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use eyre::{eyre, Result, WrapErr};
use lexcita_core::{
    errors::LexResult,
    scheduling::{BookingScope, Slot},
};
use std::{env, ops::RangeInclusive};
use tracing::Level;

use crate::booking;

pub const MIN_SECRET_BYTES: usize = 32;

/// Accepted values for `SESSION_TTL_HOURS` (up to 30 days).
pub const SESSION_TTL_HOURS: RangeInclusive<i64> = 1..=720;

/// Configuration for the Lexcita API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// HMAC key for session tokens
    pub session_secret: String,

    /// Session token lifetime in hours
    pub session_ttl_hours: i64,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub timezone: Tz,
    pub booking_scope: BookingScope,
    pub office_opens: NaiveTime,
    pub office_closes: NaiveTime,
    pub slot_step_minutes: i64,
    pub calendar_domain: String,
}

fn parse_time(var: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").wrap_err_with(|| format!("Invalid {} value", var))
}

impl ApiConfig {
    /// Builds a configuration with every optional setting at its default.
    pub fn new(database_url: impl Into<String>, session_secret: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: database_url.into(),
            log_level: Level::INFO,
            cors_origins: None,
            session_secret: session_secret.into(),
            session_ttl_hours: 24,
            request_timeout: 30,
            timezone: chrono_tz::America::Guayaquil,
            booking_scope: BookingScope::Lawyer,
            office_opens: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            office_closes: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            slot_step_minutes: 30,
            calendar_domain: "lexcita.local".to_string(),
        }
    }

    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `SESSION_SECRET` is not set
    /// - `SESSION_SECRET` is shorter than 32 bytes
    /// - a numeric, time zone, scope or time-of-day value cannot be parsed
    /// - any value fails [`ApiConfig::validate`]
    pub fn from_env() -> Result<Self> {
        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Security settings
        let session_secret = env::var("SESSION_SECRET")
            .wrap_err("SESSION_SECRET environment variable must be set")?;

        let mut config = Self::new(database_url, session_secret);

        // Network settings
        if let Ok(host) = env::var("API_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("API_PORT") {
            config.port = port.parse().wrap_err("Invalid API_PORT value")?;
        }

        // Logging settings
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        config.log_level = match log_level.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        config.cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        if let Ok(hours) = env::var("SESSION_TTL_HOURS") {
            config.session_ttl_hours =
                hours.parse().wrap_err("Invalid SESSION_TTL_HOURS value")?;
        }

        // Performance settings
        config.request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        if let Ok(zone) = env::var("FIRM_TIMEZONE") {
            config.timezone = zone
                .parse::<Tz>()
                .map_err(|e| eyre!("Invalid FIRM_TIMEZONE value: {}", e))?;
        }
        if let Ok(scope) = env::var("BOOKING_SCOPE") {
            config.booking_scope = scope.parse().wrap_err("Invalid BOOKING_SCOPE value")?;
        }
        if let Ok(opens) = env::var("OFFICE_OPENS") {
            config.office_opens = parse_time("OFFICE_OPENS", &opens)?;
        }
        if let Ok(closes) = env::var("OFFICE_CLOSES") {
            config.office_closes = parse_time("OFFICE_CLOSES", &closes)?;
        }
        if let Ok(step) = env::var("SLOT_STEP_MINUTES") {
            config.slot_step_minutes = step.parse().wrap_err("Invalid SLOT_STEP_MINUTES value")?;
        }
        if let Ok(domain) = env::var("CALENDAR_DOMAIN") {
            config.calendar_domain = domain;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the values that parse but make no sense together.
    pub fn validate(&self) -> Result<()> {
        if self.session_secret.len() < MIN_SECRET_BYTES {
            return Err(eyre!(
                "SESSION_SECRET must be at least {} bytes long",
                MIN_SECRET_BYTES
            ));
        }
        if !SESSION_TTL_HOURS.contains(&self.session_ttl_hours) {
            return Err(eyre!(
                "SESSION_TTL_HOURS must be between {} and {}",
                SESSION_TTL_HOURS.start(),
                SESSION_TTL_HOURS.end()
            ));
        }
        if self.office_opens >= self.office_closes {
            return Err(eyre!("OFFICE_OPENS must be earlier than OFFICE_CLOSES"));
        }
        if self.slot_step_minutes <= 0 {
            return Err(eyre!("SLOT_STEP_MINUTES must be positive"));
        }
        Ok(())
    }

    /// Office hours on a local `date` as a UTC window.
    pub fn office_window(&self, date: NaiveDate) -> LexResult<Slot> {
        booking::office_window(self.timezone, date, self.office_opens, self.office_closes)
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
