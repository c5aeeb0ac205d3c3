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

//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup, validated, and then passed by value
//! into [`AppState`](crate::state::AppState). Any problem here is fatal: the
//! process must not accept traffic with missing provider credentials.

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Placeholder signing secret accepted outside production.
pub const DEFAULT_JWT_SECRET: &str = "change_this_secret";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "https://bizpilot.biz";
const DEFAULT_REDIRECT_URI: &str = "https://bizpilot10.onrender.com/auth/google/callback";
const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Seven days.
const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;
/// Ten years.
pub const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Startup-fatal configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("JWT_SECRET must be set to a non-default value when APP_ENV=production")]
    InsecureSigningSecret,
}

/// Deployment mode, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Configuration for the relay.
#[derive(Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:3000").
    pub listen_addr: String,
    pub environment: Environment,
    /// Shared secret used to sign session tokens (HMAC-SHA256).
    pub jwt_secret: String,
    /// Session token time-to-live in seconds (default: 7 days).
    pub session_ttl_secs: i64,
    /// Origin the browser is sent back to after login.
    pub frontend_url: Url,
    pub provider: ProviderConfig,
}

/// Identity provider (Google) OAuth configuration.
#[derive(Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Callback URI registered with the provider.
    pub redirect_uri: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub userinfo_url: Url,
    /// Bound applied to each outbound provider call.
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("environment", &self.environment)
            .field("jwt_secret", &"<redacted>")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("frontend_url", &self.frontend_url.as_str())
            .field("provider", &self.provider)
            .finish()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("userinfo_url", &self.userinfo_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `GOOGLE_CLIENT_ID`
    /// - `GOOGLE_CLIENT_SECRET`
    /// - `JWT_SECRET` (only when `APP_ENV=production`)
    ///
    /// # Optional
    /// - `PORT` (default: `3000`)
    /// - `APP_ENV` (`development` or `production`, default: `development`)
    /// - `FRONTEND_URL`, `GOOGLE_REDIRECT_URI`
    /// - `OAUTH_AUTH_URL`, `OAUTH_TOKEN_URL`, `OAUTH_USERINFO_URL`
    /// - `OAUTH_TIMEOUT_SECS` (default: `10`)
    /// - `SESSION_TTL_SECS` (default: `604800`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV").as_deref() {
            None => Environment::Development,
            Some(v) if v.eq_ignore_ascii_case("development") => Environment::Development,
            Some(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "APP_ENV",
                    reason: format!("expected `development` or `production`, got `{other}`"),
                })
            }
        };

        let client_id = get("GOOGLE_CLIENT_ID").ok_or(ConfigError::Missing("GOOGLE_CLIENT_ID"))?;
        let client_secret =
            get("GOOGLE_CLIENT_SECRET").ok_or(ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?;

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) if secret != DEFAULT_JWT_SECRET => secret,
            _ if environment == Environment::Production => {
                return Err(ConfigError::InsecureSigningSecret)
            }
            _ => {
                tracing::warn!(
                    "JWT_SECRET is unset or left at the placeholder; sessions are signed with an insecure default"
                );
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("`{v}` is not a valid port"),
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = parse_positive(&get, "OAUTH_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let session_ttl_secs =
            parse_positive(&get, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS as u64)?;
        let session_ttl_secs = i64::try_from(session_ttl_secs)
            .ok()
            .filter(|ttl| *ttl <= MAX_SESSION_TTL_SECS)
            .ok_or_else(|| ConfigError::Invalid {
                var: "SESSION_TTL_SECS",
                reason: format!("must not exceed {MAX_SESSION_TTL_SECS} seconds"),
            })?;

        let provider = ProviderConfig {
            client_id,
            client_secret,
            redirect_uri: get("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            auth_url: parse_url(&get, "OAUTH_AUTH_URL", DEFAULT_AUTH_URL)?,
            token_url: parse_url(&get, "OAUTH_TOKEN_URL", DEFAULT_TOKEN_URL)?,
            userinfo_url: parse_url(&get, "OAUTH_USERINFO_URL", DEFAULT_USERINFO_URL)?,
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            listen_addr: format!("0.0.0.0:{port}"),
            environment,
            jwt_secret,
            session_ttl_secs,
            frontend_url: parse_url(&get, "FRONTEND_URL", DEFAULT_FRONTEND_URL)?,
            provider,
        })
    }
}

fn parse_url<G>(get: &G, var: &'static str, default: &str) -> Result<Url, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let raw = get(var).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

fn parse_positive<G>(get: &G, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(var) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            reason: format!("`{raw}` must be a positive integer"),
        }),
    }
}
