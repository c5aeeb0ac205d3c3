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

//! Identity and session token (JWT) claims.
//!
//! The relay signs a session token after a successful provider login; every
//! protected endpoint verifies the signature and hands back these claims.

use serde::{Deserialize, Serialize};

/// Normalized identity of an end user, as reported by the identity provider.
///
/// Optional profile fields are omitted from the JSON form when the provider
/// did not return them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Verified email address (unique identity).
    pub email: String,

    /// Display name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl IdentityClaims {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            given_name: None,
            family_name: None,
            picture: None,
        }
    }
}

/// JWT payload for a session token.
///
/// # Example payload
///
/// ```json
/// {
///   "email": "user@example.com",
///   "name": "Alice",
///   "iat": 1707004800,
///   "exp": 1707609600
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: IdentityClaims,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    /// Token is rejected after this time.
    pub exp: i64,
}

impl SessionClaims {
    /// Returns `None` when `issued_at + ttl_secs` overflows.
    pub fn new(identity: IdentityClaims, issued_at: i64, ttl_secs: i64) -> Option<Self> {
        Some(Self {
            identity,
            iat: issued_at,
            exp: issued_at.checked_add(ttl_secs)?,
        })
    }
}
