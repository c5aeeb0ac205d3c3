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

//! OAuth2 Authorization Code flow against the identity provider:
//! authorization URL construction, code → access token exchange, and the
//! UserInfo lookup that yields the user's identity.

pub mod authorize;
pub mod client;
pub mod exchange;
pub mod userinfo;

use std::fmt;

use thiserror::Error;

pub use authorize::build_auth_url;
pub use client::ProviderClient;
pub use exchange::{exchange_code, AuthorizationCode, ProviderTokenResponse};
pub use userinfo::{fetch_userinfo, UserInfoResponse};

/// Error bodies are cut to this many bytes before they are kept for logs.
const MAX_UPSTREAM_BODY: usize = 1024;

/// Largest successful response body the relay will buffer.
const MAX_RESPONSE_BODY: usize = 64 * 1024;

/// Which of the two provider calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TokenExchange,
    UserInfo,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::TokenExchange => f.write_str("token exchange"),
            Stage::UserInfo => f.write_str("userinfo"),
        }
    }
}

/// Failure talking to the identity provider.
///
/// Carries upstream detail for operators. None of the variants ever contain
/// the client secret: it only travels in the token request body, which is
/// never echoed back here.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{stage} request timed out")]
    Timeout { stage: Stage },

    #[error("{stage} request failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} endpoint returned HTTP {status}: {body}")]
    Status {
        stage: Stage,
        status: u16,
        body: String,
    },

    #[error("{stage} response could not be parsed: {detail}")]
    Malformed { stage: Stage, detail: String },

    #[error("{stage} response is missing `{field}`")]
    MissingField { stage: Stage, field: &'static str },
}

impl ProviderError {
    pub fn stage(&self) -> Stage {
        match self {
            ProviderError::Timeout { stage }
            | ProviderError::Transport { stage, .. }
            | ProviderError::Status { stage, .. }
            | ProviderError::Malformed { stage, .. }
            | ProviderError::MissingField { stage, .. } => *stage,
        }
    }

    fn from_reqwest(stage: Stage, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout { stage }
        } else {
            ProviderError::Transport { stage, source: err }
        }
    }
}

/// Read a response body and turn non-2xx statuses into [`ProviderError::Status`].
///
/// Never buffers more than [`MAX_RESPONSE_BODY`] bytes; a larger success body
/// is [`ProviderError::Malformed`].
async fn read_success_body(
    stage: Stage,
    response: reqwest::Response,
) -> Result<String, ProviderError> {
    let status = response.status();

    if !status.is_success() {
        let (bytes, cut) = read_capped(stage, response, MAX_UPSTREAM_BODY).await?;
        let mut body = String::from_utf8_lossy(&bytes).into_owned();
        if cut {
            body.push('…');
        }
        return Err(ProviderError::Status {
            stage,
            status: status.as_u16(),
            body,
        });
    }

    let (bytes, cut) = read_capped(stage, response, MAX_RESPONSE_BODY).await?;
    if cut {
        return Err(ProviderError::Malformed {
            stage,
            detail: format!("body exceeds {MAX_RESPONSE_BODY} bytes"),
        });
    }

    String::from_utf8(bytes).map_err(|e| ProviderError::Malformed {
        stage,
        detail: e.to_string(),
    })
}

/// Collect at most `limit` bytes of the body. The flag is set when more
/// data followed; the rest of the stream is dropped unread.
async fn read_capped(
    stage: Stage,
    mut response: reqwest::Response,
    limit: usize,
) -> Result<(Vec<u8>, bool), ProviderError> {
    let mut buf = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ProviderError::from_reqwest(stage, e))?
    {
        let room = limit - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            return Ok((buf, true));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok((buf, false))
}
