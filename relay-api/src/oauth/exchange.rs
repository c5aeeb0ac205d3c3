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

//! Authorization code → access token exchange.

use serde::Deserialize;

use crate::config::ProviderConfig;

use super::{read_success_body, ProviderError, Stage};

/// A non-empty authorization code taken from the provider callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    /// Returns `None` for absent, empty, or whitespace-only codes.
    pub fn new(code: Option<String>) -> Option<Self> {
        code.filter(|c| !c.trim().is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw response from the OAuth token endpoint.
///
/// Only `access_token` is used. Refresh and ID tokens are dropped with the
/// rest of the response.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProviderTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Exchange an authorization code for an access token.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &ProviderConfig,
    code: &AuthorizationCode,
) -> Result<String, ProviderError> {
    const STAGE: Stage = Stage::TokenExchange;

    let params = [
        ("grant_type", "authorization_code"),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("code", code.as_str()),
    ];

    let response = http
        .post(config.token_url.clone())
        .form(&params)
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(STAGE, e))?;

    let body = read_success_body(STAGE, response).await?;
    parse_token_response(&body)
}

fn parse_token_response(body: &str) -> Result<String, ProviderError> {
    let token_response: ProviderTokenResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed {
            stage: Stage::TokenExchange,
            detail: e.to_string(),
        })?;

    token_response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(ProviderError::MissingField {
            stage: Stage::TokenExchange,
            field: "access_token",
        })
}
