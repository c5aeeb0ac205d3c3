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

//! Authorization URL construction.

use url::Url;

use crate::config::ProviderConfig;

/// Basic identity, email address and profile.
pub const SCOPES: &str = "openid email profile";

/// Build the provider authorization URL the browser is redirected to.
///
/// Parameters are URL-encoded and depend only on static configuration.
/// `access_type=offline` lets the provider issue a refresh token (which the
/// relay discards) and `prompt=consent` makes it re-confirm grants on every
/// login.
pub fn build_auth_url(config: &ProviderConfig) -> Url {
    let mut url = config.auth_url.clone();

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", SCOPES)
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");

    url
}
