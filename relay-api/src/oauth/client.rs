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

//! HTTP client bound to the configured identity provider.

use std::sync::Arc;

use relay_types::IdentityClaims;
use url::Url;

use crate::config::ProviderConfig;

use super::{authorize, exchange, userinfo, AuthorizationCode, ProviderError};

/// Outbound client for the identity provider.
///
/// Cheap to clone: the connection pool and configuration are shared.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    config: Arc<ProviderConfig>,
}

impl ProviderClient {
    /// Build a client whose every request is bounded by `config.timeout`.
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn authorization_url(&self) -> Url {
        authorize::build_auth_url(&self.config)
    }

    /// Redeem `code` and return the user's identity.
    ///
    /// Runs the token exchange and then the UserInfo lookup, once each. The
    /// access token lives only for the duration of this call.
    pub async fn exchange(
        &self,
        code: &AuthorizationCode,
    ) -> Result<IdentityClaims, ProviderError> {
        let access_token = exchange::exchange_code(&self.http, &self.config, code).await?;
        userinfo::fetch_userinfo(&self.http, &self.config, &access_token).await
    }
}
