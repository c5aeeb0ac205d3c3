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

//! Axum extractor that authenticates a request from its `Authorization: Bearer` header.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use relay_types::SessionClaims;

use crate::error::AppError;
use crate::state::AppState;
use crate::token_validator;

/// Why no credential could be taken from the request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// No `Authorization` header, or one with an empty value.
    Missing,
    /// Header present but not of the form `Bearer <token>`.
    Malformed,
}

/// Extract the bearer token from the `Authorization` header.
///
/// Accepts exactly two whitespace-separated parts, the first being the
/// `Bearer` scheme (case-insensitive). A blank header counts as absent.
pub fn bearer_credential(headers: &HeaderMap) -> Result<&str, CredentialError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(CredentialError::Missing)?
        .to_str()
        .map_err(|_| CredentialError::Malformed)?;
    if value.trim().is_empty() {
        return Err(CredentialError::Missing);
    }

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(CredentialError::Malformed),
    }
}

/// Extractor that resolves the verified session claims of the caller.
///
/// Usage in a handler:
/// ```ignore
/// async fn my_handler(SessionUser(claims): SessionUser) { ... }
/// ```
#[derive(Debug)]
pub struct SessionUser(pub SessionClaims);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_credential(&parts.headers).map_err(|e| match e {
            CredentialError::Missing => AppError::MissingCredential,
            CredentialError::Malformed => {
                tracing::debug!("Rejecting malformed Authorization header");
                AppError::InvalidSession
            }
        })?;

        token_validator::verify_session(&state.jwt_secret, token)
            .map(SessionUser)
            .map_err(|e| {
                tracing::debug!("Session token rejected: {e}");
                AppError::InvalidSession
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(v) = value {
            map.insert(header::AUTHORIZATION, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn bearer_token_is_extracted() {
        let map = headers(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_credential(&map), Ok("abc.def.ghi"));
    }

    #[test]
    fn scheme_is_case_insensitive_and_whitespace_tolerant() {
        let map = headers(Some("bearer   abc.def.ghi "));
        assert_eq!(bearer_credential(&map), Ok("abc.def.ghi"));
    }

    #[test]
    fn missing_header_is_missing() {
        assert_eq!(bearer_credential(&headers(None)), Err(CredentialError::Missing));
    }

    #[test]
    fn blank_header_is_missing() {
        for value in ["", " ", "\t  "] {
            assert_eq!(
                bearer_credential(&headers(Some(value))),
                Err(CredentialError::Missing),
                "{value:?} should be missing"
            );
        }
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for value in ["Bearer", "Bearer ", "Basic dXNlcjpwdw==", "abc.def.ghi", "Bearer a b"] {
            assert_eq!(
                bearer_credential(&headers(Some(value))),
                Err(CredentialError::Malformed),
                "{value:?} should be malformed"
            );
        }
    }

    #[test]
    fn non_ascii_header_is_malformed() {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert_eq!(bearer_credential(&map), Err(CredentialError::Malformed));
    }
}
