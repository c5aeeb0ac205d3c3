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

//! OAuth route handlers: login and callback.
//!
//! After a successful provider login the callback issues a **signed session
//! JWT** and sends the browser back to the frontend with the token in the
//! `token` query parameter. Nothing is stored server-side.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::oauth::AuthorizationCode;
use crate::state::AppState;
use crate::token;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    /// Set by the provider when the user denies consent.
    pub error: Option<String>,
}

/// `302 Found` with a `Location` header.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// GET /auth/google
///
/// Starts the OAuth flow by redirecting to the identity provider.
pub async fn login(State(state): State<AppState>) -> Response {
    let auth_url = state.provider.authorization_url();
    tracing::debug!("Redirecting to identity provider");
    found(auth_url.as_str())
}

/// GET /auth/google/callback?code=...
///
/// Exchanges the authorization code for the user's identity, signs a session
/// JWT, and redirects to `<frontend>/?token=<jwt>`.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let Some(code) = AuthorizationCode::new(query.code) else {
        if let Some(error) = query.error.as_deref() {
            tracing::warn!("Identity provider returned error on callback: {error}");
        }
        return Err(AppError::MissingCode);
    };

    let identity = state.provider.exchange(&code).await?;

    tracing::info!(
        "OAuth login successful for {} ({})",
        identity.name,
        identity.email
    );

    let session_jwt = token::issue_session(&state.jwt_secret, identity, state.session_ttl_secs)?;

    Ok(found(&state.frontend_redirect(&session_jwt)))
}
