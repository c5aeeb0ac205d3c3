/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Session token (JWT) generation.
//!
//! The relay signs tokens with a shared secret (HMAC-SHA256). Any holder of
//! the same secret can validate them; no server-side record is kept.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use relay_types::{IdentityClaims, SessionClaims};

use crate::error::AppError;

/// Sign a session token for `identity`, valid for `ttl_secs` from now.
pub fn issue_session(
    secret: &str,
    identity: IdentityClaims,
    ttl_secs: i64,
) -> Result<String, AppError> {
    issue_session_at(secret, identity, ttl_secs, Utc::now().timestamp())
}

/// Sign a session token with an explicit issued-at timestamp (Unix seconds).
pub fn issue_session_at(
    secret: &str,
    identity: IdentityClaims,
    ttl_secs: i64,
    issued_at: i64,
) -> Result<String, AppError> {
    let claims = SessionClaims::new(identity, issued_at, ttl_secs).ok_or_else(|| {
        AppError::Signing(format!("session expiry overflows: iat={issued_at}, ttl={ttl_secs}"))
    })?;

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Signing(e.to_string()))
}
