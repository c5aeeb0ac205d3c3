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

//! UserInfo endpoint lookup and identity normalization.

use relay_types::IdentityClaims;
use serde::Deserialize;

use crate::config::ProviderConfig;

use super::{read_success_body, ProviderError, Stage};

/// Response from the provider's UserInfo endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct UserInfoResponse {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserInfoResponse {
    /// Return a display name, coalescing `name`, `given_name + family_name`, or email.
    fn display_name(&self, email: &str) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match (self.given_name.as_deref(), self.family_name.as_deref()) {
            (Some(g), Some(f)) if !g.is_empty() && !f.is_empty() => format!("{g} {f}"),
            (Some(g), _) if !g.is_empty() => g.to_string(),
            _ => email.to_string(),
        }
    }

    /// Normalize into the claims embedded in the session token.
    pub fn into_identity(self) -> Result<IdentityClaims, ProviderError> {
        let email = self
            .email
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or(ProviderError::MissingField {
                stage: Stage::UserInfo,
                field: "email",
            })?;
        let name = self.display_name(&email);

        Ok(IdentityClaims {
            email,
            name,
            given_name: self.given_name,
            family_name: self.family_name,
            picture: self.picture,
        })
    }
}

/// Fetch the user's profile from the UserInfo endpoint using the access token.
pub async fn fetch_userinfo(
    http: &reqwest::Client,
    config: &ProviderConfig,
    access_token: &str,
) -> Result<IdentityClaims, ProviderError> {
    const STAGE: Stage = Stage::UserInfo;

    let response = http
        .get(config.userinfo_url.clone())
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| ProviderError::from_reqwest(STAGE, e))?;

    let body = read_success_body(STAGE, response).await?;
    let info: UserInfoResponse =
        serde_json::from_str(&body).map_err(|e| ProviderError::Malformed {
            stage: STAGE,
            detail: e.to_string(),
        })?;

    info.into_identity()
}
