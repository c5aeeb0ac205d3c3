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

//! JWT session token validation.
//!
//! Verifies tokens produced by [`crate::token`]. Failures are classified here
//! for logging only; callers collapse every variant into one generic
//! rejection so clients cannot tell which check failed.

use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, Validation};
use relay_types::SessionClaims;
use std::fmt;

/// Errors that can occur during session token validation.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Token has expired (`exp` claim is in the past).
    Expired,
    /// Signature does not match the shared secret.
    BadSignature,
    /// Token could not be decoded, or uses an unexpected algorithm.
    Malformed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Expired => write!(f, "token has expired"),
            SessionError::BadSignature => write!(f, "token signature is invalid"),
            SessionError::Malformed(msg) => write!(f, "malformed token: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Decode and validate a session token, extracting its claims.
///
/// Checks:
/// 1. Algorithm is HS256
/// 2. Signature is valid for `secret`
/// 3. Token is not expired (`exp`, no leeway)
pub fn verify_session(secret: &str, token: &str) -> Result<SessionClaims, SessionError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);
    validation.validate_exp = true;
    validation.leeway = 0;

    jsonwebtoken::decode::<SessionClaims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            ErrorKind::InvalidSignature => SessionError::BadSignature,
            _ => SessionError::Malformed(e.to_string()),
        })
}
