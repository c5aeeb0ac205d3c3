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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Login failures answer with a short plain-text body. Protected endpoints
//! answer with an [`ErrorBody`] JSON object. Upstream and validation detail is
//! logged, never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_types::ErrorBody;
use thiserror::Error;

use crate::oauth::ProviderError;

/// Request-scoped failure, mapped to an HTTP response at the handler boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The provider callback arrived without a `code` query parameter.
    #[error("missing authorization code")]
    MissingCode,

    #[error("identity provider exchange failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to sign session token: {0}")]
    Signing(String),

    /// No `Authorization` header on a protected request.
    #[error("missing bearer credential")]
    MissingCredential,

    /// Malformed header, bad signature, malformed or expired token.
    #[error("invalid session token")]
    InvalidSession,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCode => StatusCode::BAD_REQUEST,
            AppError::Provider(_) | AppError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingCredential | AppError::InvalidSession => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::MissingCode => (status, "Missing authorization code").into_response(),
            AppError::Provider(err) => {
                tracing::error!(stage = %err.stage(), "Google OAuth error: {err}");
                (status, "Google authentication failed").into_response()
            }
            AppError::Signing(detail) => {
                tracing::error!("Session signing error: {detail}");
                (status, "Internal server error").into_response()
            }
            AppError::MissingCredential => (status, Json(ErrorBody::no_token())).into_response(),
            AppError::InvalidSession => (status, Json(ErrorBody::invalid_token())).into_response(),
        }
    }
}
