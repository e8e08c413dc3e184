//! Tests for the auth module

use super::*;
use crate::config::DriverConfig;
use crate::dsn::ConnectionOptions;
use crate::error::Error;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(dsn: &str) -> ConnectionOptions {
    ConnectionOptions::parse(dsn).unwrap()
}

// ============================================================================
// Token Sources
// ============================================================================

#[tokio::test]
async fn test_static_token_source() {
    let source = StaticTokenSource::new("ya29.static");
    assert_eq!(source.token().await.unwrap(), "ya29.static");
    assert_eq!(source.token().await.unwrap(), "ya29.static");
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("client_id=my-client"))
        .and(body_string_contains("client_secret=my-secret"))
        .and(body_string_contains("refresh_token=1%2Frefresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.fresh",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(&mock_server)
        .await;

    let source = RefreshTokenSource::new(
        format!("{}/token", mock_server.uri()),
        "my-client",
        "my-secret",
        "1/refresh",
        Client::new(),
    );

    assert_eq!(source.token().await.unwrap(), "ya29.fresh");
}

#[tokio::test]
async fn test_refresh_token_is_cached() {
    let mock_server = MockServer::start().await;

    // This should only be called once due to caching
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.cached"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = RefreshTokenSource::new(
        format!("{}/token", mock_server.uri()),
        "id",
        "secret",
        "refresh",
        Client::new(),
    );

    for _ in 0..3 {
        assert_eq!(source.token().await.unwrap(), "ya29.cached");
    }
}

#[tokio::test]
async fn test_token_refreshed_before_expiry() {
    let mock_server = MockServer::start().await;

    // Expires inside the refresh margin, so every call refreshes
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.short",
            "expires_in": TOKEN_EXPIRY_DELTA_SECONDS / 2
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let source = RefreshTokenSource::new(
        format!("{}/token", mock_server.uri()),
        "id",
        "secret",
        "refresh",
        Client::new(),
    );

    source.token().await.unwrap();
    source.token().await.unwrap();
}

#[tokio::test]
async fn test_clear_cache_forces_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.again",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let source = RefreshTokenSource::new(
        format!("{}/token", mock_server.uri()),
        "id",
        "secret",
        "refresh",
        Client::new(),
    );

    source.token().await.unwrap();
    source.clear_cache().await;
    source.token().await.unwrap();
}

#[tokio::test]
async fn test_refresh_failure_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant"
        })))
        .mount(&mock_server)
        .await;

    let source = RefreshTokenSource::new(
        format!("{}/token", mock_server.uri()),
        "id",
        "secret",
        "revoked",
        Client::new(),
    );

    let err = source.token().await.unwrap_err();
    assert!(matches!(&err, Error::TokenRefresh { message } if message.contains("invalid_grant")));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_refresh_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let source = RefreshTokenSource::new(
        format!("{}/token", mock_server.uri()),
        "id",
        "secret",
        "refresh",
        Client::new(),
    );

    assert!(matches!(
        source.token().await,
        Err(Error::TokenRefresh { .. })
    ));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_register_and_lookup() {
    let registry = ClientRegistry::new();
    assert!(registry.is_empty());

    assert!(registry.register("reporting", Client::new()).is_none());
    assert!(registry.register("reporting", Client::new()).is_some());
    registry.register("audit", Client::new());

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("reporting"));
    assert!(registry.get("audit").is_some());
    assert_eq!(registry.names(), vec!["audit", "reporting"]);

    assert!(registry.unregister("audit").is_some());
    assert!(registry.unregister("audit").is_none());
    assert!(registry.get("audit").is_none());
}

#[test]
fn test_registry_concurrent_access() {
    let registry = Arc::new(ClientRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let name = format!("client-{i}");
                registry.register(name.clone(), Client::new());
                assert!(registry.get(&name).is_some());
                if i % 2 == 1 {
                    registry.unregister(&name);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.names(), vec!["client-0", "client-2", "client-4", "client-6"]);
}

// ============================================================================
// Resolver
// ============================================================================

#[test]
fn test_resolve_named_client() {
    let registry = ClientRegistry::new();
    registry.register("shared", Client::new());

    let transport = resolve(
        &options("adwords?adwords_id=1&http_client=shared"),
        &registry,
        &DriverConfig::default(),
    )
    .unwrap();
    assert!(!transport.has_token_source());
    assert!(!transport.has_developer_token());
}

#[test]
fn test_resolve_unknown_named_client() {
    let err = resolve(
        &options("adwords?adwords_id=1&http_client=missing&access_token=tok&developer_token=dev"),
        &ClientRegistry::new(),
        &DriverConfig::default(),
    )
    .unwrap_err();

    // The named client wins over the other credential fields
    assert!(matches!(err, Error::UnknownNamedClient { name } if name == "missing"));
}

#[test]
fn test_resolve_access_token() {
    let transport = resolve(
        &options("adwords?adwords_id=1&access_token=tok&developer_token=dev&timeout=5s"),
        &ClientRegistry::new(),
        &DriverConfig::default(),
    )
    .unwrap();
    assert!(transport.has_token_source());
    assert!(transport.has_developer_token());
    assert_eq!(transport.timeout(), Duration::from_secs(5));
}

#[test]
fn test_resolve_requires_developer_token() {
    let registry = ClientRegistry::new();
    let config = DriverConfig::default();

    let err = resolve(&options("adwords?adwords_id=1&access_token=tok"), &registry, &config)
        .unwrap_err();
    assert!(matches!(err, Error::MissingDeveloperToken { method: "access token" }));

    let err = resolve(
        &options("adwords?adwords_id=1&refresh_token=r&client_id=c&client_secret=s"),
        &registry,
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingDeveloperToken { method: "refresh token" }));
}

#[test]
fn test_resolve_refresh_token_extends_timeout() {
    let config = DriverConfig::default();
    let transport = resolve(
        &options("adwords?adwords_id=1&refresh_token=r&client_id=c&client_secret=s&developer_token=dev"),
        &ClientRegistry::new(),
        &config,
    )
    .unwrap();

    assert!(transport.has_token_source());
    assert_eq!(
        transport.timeout(),
        config.default_timeout + config.refresh_timeout_extension
    );
}

#[test]
fn test_resolve_without_credentials() {
    let transport = resolve(
        &options("adwords?adwords_id=1"),
        &ClientRegistry::new(),
        &DriverConfig::default(),
    )
    .unwrap();
    assert!(!transport.has_token_source());
    assert!(!transport.has_developer_token());
}

#[test]
fn test_credential_debug_redacts_secrets() {
    let opts = options("adwords?adwords_id=1&access_token=secret-token&developer_token=dev");
    let debug = format!("{:?}", opts.credentials);
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("StaticToken"));
}
