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

//! Integration tests for the login redirect and the provider callback.


use std::collections::HashMap;
use std::time::Duration;

use axum::body::Body;
use axum::http::StatusCode;
use relay_api::token_validator::verify_session;
use relay_types::IdentityClaims;
use serde_json::json;
use test_helpers::*;
use tower::ServiceExt;
use url::Url;

fn token_from_location(location: &str) -> String {
    let url = Url::parse(location).expect("absolute Location");
    url.query_pairs()
        .find(|(k, _)| k == "token")
        .map(|(_, v)| v.into_owned())
        .expect("token query parameter")
}

#[tokio::test]
async fn test_login_redirects_to_provider() {
    let provider = MockProvider::start(ProviderBehavior::happy()).await;
    let app = build_app(&test_config(&provider.base_url(), 5));

    let req = get_request("/auth/google").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    let url = Url::parse(&location(&resp)).unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("accounts.google.com"));
    assert_eq!(params["client_id"], TEST_CLIENT_ID);
    assert_eq!(params["redirect_uri"], TEST_REDIRECT_URI);
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["scope"], "openid email profile");
    assert_eq!(params["access_type"], "offline");
    assert_eq!(params["prompt"], "consent");
    assert_eq!(provider.total_hits(), 0);
}

#[tokio::test]
async fn test_callback_without_code_is_400_and_calls_nothing() {
    let provider = MockProvider::start(ProviderBehavior::happy()).await;
    let app = build_app(&test_config(&provider.base_url(), 5));

    for uri in [
        "/auth/google/callback",
        "/auth/google/callback?code=",
        "/auth/google/callback?error=access_denied",
    ] {
        let req = get_request(uri).body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(response_text(resp).await, "Missing authorization code");
    }
    assert_eq!(provider.total_hits(), 0);
}

#[tokio::test]
async fn test_callback_issues_token_and_redirects_to_frontend() {
    let provider = MockProvider::start(ProviderBehavior::happy()).await;
    let app = build_app(&test_config(&provider.base_url(), 5));

    let req = get_request("/auth/google/callback?code=4%2F0AbCode&scope=email")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FOUND);
    let location = location(&resp);
    assert!(
        location.starts_with(&format!("{TEST_FRONTEND}/?token=")),
        "unexpected Location: {location}"
    );

    let claims = verify_session(TEST_JWT_SECRET, &token_from_location(&location))
        .expect("issued token should verify");
    assert_eq!(claims.identity, IdentityClaims::new("u@x.com", "U"));
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);

    // Token exchange carried the code and credentials, then UserInfo used T1.
    let forms = provider.token_forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["code"], "4/0AbCode");
    assert_eq!(forms[0]["grant_type"], "authorization_code");
    assert_eq!(forms[0]["client_id"], TEST_CLIENT_ID);
    assert_eq!(forms[0]["client_secret"], TEST_CLIENT_SECRET);
    assert_eq!(forms[0]["redirect_uri"], TEST_REDIRECT_URI);
    assert_eq!(provider.userinfo_auth_headers(), vec!["Bearer T1".to_string()]);
}

#[tokio::test]
async fn test_callback_fails_when_userinfo_fails() {
    let provider = MockProvider::start(ProviderBehavior {
        userinfo_status: StatusCode::UNAUTHORIZED,
        userinfo_body: json!({ "error": { "code": 401, "message": "Invalid Credentials" } }),
        ..ProviderBehavior::happy()
    })
    .await;
    let app = build_app(&test_config(&provider.base_url(), 5));

    let req = get_request("/auth/google/callback?code=abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get("location").is_none());
    let body = response_text(resp).await;
    assert_eq!(body, "Google authentication failed");
    assert!(!body.contains("Invalid Credentials"));
    assert_eq!(provider.token_hits(), 1);
    assert_eq!(provider.userinfo_hits(), 1);
}

#[tokio::test]
async fn test_callback_fails_when_token_exchange_is_rejected() {
    let provider = MockProvider::start(ProviderBehavior {
        token_status: StatusCode::BAD_REQUEST,
        token_body: json!({ "error": "invalid_grant", "error_description": "Bad Request" }),
        ..ProviderBehavior::happy()
    })
    .await;
    let app = build_app(&test_config(&provider.base_url(), 5));

    let req = get_request("/auth/google/callback?code=reused")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(provider.token_hits(), 1);
    assert_eq!(provider.userinfo_hits(), 0);
}

#[tokio::test]
async fn test_callback_fails_when_access_token_missing() {
    let provider = MockProvider::start(ProviderBehavior {
        token_body: json!({ "token_type": "Bearer" }),
        ..ProviderBehavior::happy()
    })
    .await;
    let app = build_app(&test_config(&provider.base_url(), 5));

    let req = get_request("/auth/google/callback?code=abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(provider.userinfo_hits(), 0);
}

#[tokio::test]
async fn test_callback_times_out_slow_provider() {
    let provider = MockProvider::start(ProviderBehavior {
        token_delay: Some(Duration::from_secs(5)),
        ..ProviderBehavior::happy()
    })
    .await;
    let app = build_app(&test_config(&provider.base_url(), 1));

    let req = get_request("/auth/google/callback?code=abc")
        .body(Body::empty())
        .unwrap();
    let started = std::time::Instant::now();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(provider.userinfo_hits(), 0);
}

#[tokio::test]
async fn test_callback_times_out_slow_userinfo() {
    let provider = MockProvider::start(ProviderBehavior {
        userinfo_delay: Some(Duration::from_secs(5)),
        ..ProviderBehavior::happy()
    })
    .await;
    let app = build_app(&test_config(&provider.base_url(), 1));

    let req = get_request("/auth/google/callback?code=abc")
        .body(Body::empty())
        .unwrap();
    let started = std::time::Instant::now();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(provider.token_hits(), 1);
    assert_eq!(provider.userinfo_hits(), 1);
    assert_eq!(response_text(resp).await, "Google authentication failed");
}

#[tokio::test]
async fn test_callback_fails_when_provider_unreachable() {
    // Bind then drop a listener to get a port nothing is serving on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let app = build_app(&test_config(&format!("http://{addr}"), 2));

    let req = get_request("/auth/google/callback?code=abc")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response_text(resp).await, "Google authentication failed");
}
