use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use lexcita_core::{
    errors::LexError,
    models::{
        client::Client,
        response::{Ack, Single},
        user::{AuthResponse, AuthStatus, LoginRequest, RegisterRequest, Role, User},
    },
};
use lexcita_db::{
    models::DbUser,
    repositories::{
        client,
        user::{self, NewUser},
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{self as session, AuthUser, MaybeAuthUser},
        error_handling::{constraint_error, AppError},
        extract::AppJson,
    },
    ApiState,
};

const DUPLICATE_EMAIL: &str = "El email ya está registrado";
const DUPLICATE_CLIENT: &str = "Ya existe un cliente con esa cédula";
const BAD_CREDENTIALS: &str = "Email o contraseña incorrectos";

fn signed_in(state: &ApiState, row: DbUser) -> Result<AuthResponse, AppError> {
    let account = User::try_from(row)?;
    let ttl = Duration::try_hours(state.config.session_ttl_hours)
        .ok_or_else(|| LexError::Internal("SESSION_TTL_HOURS is out of range".into()))?;
    let (token, expires_at) = session::issue_token(
        &state.config.session_secret,
        account.id,
        account.role,
        ttl,
        Utc::now(),
    )?;

    Ok(AuthResponse {
        success: true,
        token,
        expires_at,
        user: account,
    })
}

/// Resolves the client record a new account may act for.
///
/// A registrant with no prior bookings gets a fresh record. An existing record
/// (usually left by a public booking) is only linked when the registrant
/// presents the cédula stored on it; otherwise the account starts unlinked
/// and an admin can connect it later.
async fn claim_client(
    state: &ApiState,
    payload: &RegisterRequest,
) -> Result<Option<Uuid>, AppError> {
    match client::get_client_by_email(&state.db_pool, &payload.email).await? {
        Some(row) => {
            let existing = Client::from(row);
            if existing.is_claimed_by(payload.cedula()) {
                Ok(Some(existing.id))
            } else {
                tracing::warn!(
                    "New account for {} left unlinked from client {}",
                    existing.email,
                    existing.id
                );
                Ok(None)
            }
        }
        None => {
            let row = client::create_client(&state.db_pool, &payload.client_input())
                .await
                .map_err(|e| constraint_error(e, DUPLICATE_CLIENT, DUPLICATE_CLIENT))?;
            Ok(Some(row.id))
        }
    }
}

/// Creates a client account and signs it in.
#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    if user::get_user_by_email(&state.db_pool, &payload.email).await?.is_some() {
        return Err(LexError::Validation(DUPLICATE_EMAIL.to_string()).into());
    }

    let client_id = claim_client(&state, &payload).await?;

    let password_hash = session::hash_password(&payload.password)?;
    let row = user::create_user(
        &state.db_pool,
        NewUser {
            name: &payload.name,
            email: &payload.email,
            password_hash: &password_hash,
            role: Role::Client,
            client_id,
            lawyer_id: None,
        },
    )
    .await
    .map_err(|e| constraint_error(e, DUPLICATE_EMAIL, DUPLICATE_EMAIL))?;

    tracing::info!("Registered user {}", row.id);
    Ok(Json(signed_in(&state, row)?))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let Some(row) = user::get_user_by_email(&state.db_pool, &payload.email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(LexError::Authentication(BAD_CREDENTIALS.to_string()).into());
    };

    if !session::verify_password(&payload.password, &row.password_hash)? {
        tracing::warn!("Failed login for user {}", row.id);
        return Err(LexError::Authentication(BAD_CREDENTIALS.to_string()).into());
    }

    tracing::info!("User {} signed in", row.id);
    Ok(Json(signed_in(&state, row)?))
}

/// Tokens are not stored, so there is nothing to revoke.
#[axum::debug_handler]
pub async fn logout(
    State(_state): State<Arc<ApiState>>,
    MaybeAuthUser(caller): MaybeAuthUser,
) -> Json<Ack> {
    if let Some(caller) = caller {
        tracing::info!("User {} signed out", caller.id);
    }
    Json(Ack::new("Sesión cerrada"))
}

/// Reports whether the bearer token is valid. Never fails.
#[axum::debug_handler]
pub async fn status(
    State(state): State<Arc<ApiState>>,
    MaybeAuthUser(caller): MaybeAuthUser,
) -> Json<AuthStatus> {
    let Some(caller) = caller else {
        return Json(AuthStatus {
            authenticated: false,
            user: None,
        });
    };

    let account = match user::get_user_by_id(&state.db_pool, caller.id).await {
        Ok(Some(row)) => User::try_from(row).ok(),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Could not load user {} for status: {}", caller.id, e);
            None
        }
    };

    Json(AuthStatus {
        authenticated: account.is_some(),
        user: account,
    })
}

#[axum::debug_handler]
pub async fn current_user(
    State(state): State<Arc<ApiState>>,
    caller: AuthUser,
) -> Result<Json<Single<User>>, AppError> {
    let row = user::get_user_by_id(&state.db_pool, caller.id)
        .await?
        .ok_or_else(|| LexError::Authentication("La cuenta ya no existe".to_string()))?;
    Ok(Json(Single::new(User::try_from(row)?)))
}
