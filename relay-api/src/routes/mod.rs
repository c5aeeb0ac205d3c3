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

//! Axum router configuration for the relay.

pub mod oauth;
pub mod session;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Build the full application router. Paths are part of the frontend contract.
pub fn router() -> Router<AppState> {
    Router::new()
        // OAuth login
        .route("/auth/google", get(oauth::login))
        .route("/auth/google/callback", get(oauth::callback))
        // Session check
        .route("/me", get(session::me))
}
