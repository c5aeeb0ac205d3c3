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

//! Shared application state passed to every Axum handler via `State`.

use url::Url;

use crate::config::Config;
use crate::oauth::ProviderClient;

/// Application state shared across all request handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Identity provider client (connection pool + provider configuration).
    pub provider: ProviderClient,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Session token time-to-live in seconds.
    pub session_ttl_secs: i64,
    /// Origin the browser returns to after login.
    pub frontend_url: Url,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            provider: ProviderClient::new(config.provider.clone())?,
            jwt_secret: config.jwt_secret.clone(),
            session_ttl_secs: config.session_ttl_secs,
            frontend_url: config.frontend_url.clone(),
        })
    }

    /// `<frontend origin>/?token=<token>`.
    pub fn frontend_redirect(&self, token: &str) -> String {
        let base = self.frontend_url.as_str().trim_end_matches('/');
        format!("{base}/?token={token}")
    }
}
