//! # Authentication Module
//!
//! Password hashing with Argon2 and stateless session tokens.
//!
//! A token is `base64url(claims) "." base64url(HMAC-SHA256(claims))`, where
//! the claims are the JSON object `{sub, role, exp}`. Nothing is stored on
//! the server; logging out means the client drops the token.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use eyre::Result;
use hmac::{Hmac, Mac};
use lexcita_core::{
    errors::{LexError, LexResult},
    models::user::Role,
};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

type HmacSha256 = Hmac<Sha256>;

/// Hashes a password using the Argon2 algorithm
///
/// Generates a random salt per password and returns the PHC string, which
/// carries the algorithm parameters alongside the hash.
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks a password against a stored PHC hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| eyre::eyre!("Stored password hash is malformed: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

fn signer(secret: &str) -> LexResult<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| LexError::Internal(e.to_string().into()))
}

/// Signs a token for `user_id` that expires `ttl` after `now`.
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    role: Role,
    ttl: Duration,
    now: DateTime<Utc>,
) -> LexResult<(String, DateTime<Utc>)> {
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| LexError::Internal("Session lifetime is out of range".into()))?;
    let claims = Claims {
        sub: user_id,
        role,
        exp: expires_at.timestamp(),
    };
    let payload = serde_json::to_vec(&claims).map_err(|e| LexError::Internal(Box::new(e)))?;
    let payload = URL_SAFE_NO_PAD.encode(payload);

    let mut mac = signer(secret)?;
    mac.update(payload.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok((format!("{}.{}", payload, signature), expires_at))
}

/// Checks the signature and expiry of a token and returns its claims.
pub fn verify_token(secret: &str, token: &str, now: DateTime<Utc>) -> LexResult<Claims> {
    let invalid = || LexError::Authentication("Sesión inválida".to_string());

    let (payload, signature) = token.split_once('.').ok_or_else(invalid)?;
    let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;

    let mut mac = signer(secret)?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).map_err(|_| invalid())?;

    let payload = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| invalid())?;

    if claims.exp <= now.timestamp() {
        return Err(LexError::Authentication("La sesión ha expirado".to_string()));
    }
    Ok(claims)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The caller identified by a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> LexResult<()> {
        self.require_any(&[Role::Admin])
    }

    pub fn require_any(&self, roles: &[Role]) -> LexResult<()> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            tracing::warn!("User {} with role {} denied access", self.id, self.role);
            Err(LexError::Authorization(
                "No tiene permisos para esta operación".to_string(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            LexError::Authentication("Debe iniciar sesión".to_string())
        })?;

        let claims = verify_token(&state.config.session_secret, token, Utc::now()).map_err(|e| {
            tracing::warn!("Rejected session token: {}", e);
            e
        })?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

/// Like [`AuthUser`] but never rejects; `None` when the token is missing or invalid.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
