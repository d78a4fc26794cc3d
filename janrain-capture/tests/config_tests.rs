mod common;

use common::mock_config;
use janrain_capture::{Janrain, JanrainConfig, JanrainError, NativeForm};
use pretty_assertions::assert_eq;
use wiremock::MockServer;

// ── Config defaults ─────────────────────────────────────────────

#[test]
fn config_default() {
    let cfg = JanrainConfig::default();
    assert!(cfg.capture_server_url.is_empty());
    assert_eq!(cfg.configuration_server_url, "https://v1.api.us.janrain.com");
    assert_eq!(cfg.cdn_url, "https://ssl-static.janraincapture.com/widget_data/flow.js");
    assert_eq!(cfg.locale, "en-US");
    assert_eq!(cfg.flow_name, "standard");
    assert!(cfg.rpx_url.is_none());
    assert!(cfg.request_timeout_secs.is_none());
}

#[test]
fn config_debug_redacts_secrets() {
    let cfg = JanrainConfig {
        full_client_id: "owner".into(),
        full_client_secret: "owner-s3cret".into(),
        login_client_secret: "login-s3cret".into(),
        ..Default::default()
    };
    let debug = format!("{cfg:?}");
    assert!(debug.contains("owner"));
    assert!(!debug.contains("owner-s3cret"));
    assert!(!debug.contains("login-s3cret"));
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: JanrainConfig = serde_json::from_str(
        r#"{"capture_server_url": "https://acme.us.janraincapture.com", "app_id": "acme", "request_timeout_secs": 30}"#,
    )
    .unwrap();
    assert_eq!(cfg.capture_server_url, "https://acme.us.janraincapture.com");
    assert_eq!(cfg.flow_name, "standard");
    assert_eq!(cfg.request_timeout_secs, Some(30));
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_credentials() {
    let cfg = JanrainConfig {
        full_client_id: "owner".into(),
        full_client_secret: "s1".into(),
        login_client_id: "login".into(),
        login_client_secret: "s2".into(),
        ..Default::default()
    };
    assert_eq!(cfg.full_client().client_id, "owner");
    assert_eq!(cfg.login_client().client_secret, "s2");
}

// ── Validation ──────────────────────────────────────────────────

#[test]
fn missing_capture_server_is_rejected() {
    let err = Janrain::new(JanrainConfig {
        app_id: "acme".into(),
        ..Default::default()
    })
    .unwrap_err();
    match err {
        JanrainError::InvalidConfig(message) => assert!(message.contains("capture_server_url")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn blank_app_id_is_rejected() {
    let server = MockServer::start().await;
    let cfg = JanrainConfig {
        app_id: "  ".into(),
        ..mock_config(&server)
    };
    assert!(matches!(cfg.validate(), Err(JanrainError::InvalidConfig(_))));
    assert!(Janrain::with_client(cfg, reqwest::Client::new()).is_err());
}

#[tokio::test]
async fn with_client_keeps_config() {
    let server = MockServer::start().await;
    let janrain = Janrain::with_client(mock_config(&server), reqwest::Client::new()).unwrap();
    assert_eq!(janrain.config().app_id, "app123");
    assert_eq!(janrain.config().capture_server_url, server.uri());
}

// ── Errors ──────────────────────────────────────────────────────

#[test]
fn error_display() {
    assert_eq!(JanrainError::Network("timed out".into()).to_string(), "network error: timed out");
    assert_eq!(
        JanrainError::Http {
            status: 502,
            body: "Bad Gateway".into()
        }
        .to_string(),
        "HTTP 502: Bad Gateway"
    );
    assert_eq!(
        JanrainError::MissingSetting("rpx_realm".into()).to_string(),
        "missing client setting: rpx_realm"
    );
    assert_eq!(
        JanrainError::InvalidConfig("app_id must not be empty".into()).to_string(),
        "invalid configuration: app_id must not be empty"
    );
}

#[test]
fn error_from_serde() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: JanrainError = source.into();
    assert!(err.to_string().starts_with("serialization error:"));
}

// ── NativeForm ──────────────────────────────────────────────────

#[test]
fn native_form_builder() {
    let form = NativeForm::new("login", "HEAD", "signInForm")
        .redirect_uri("https://example.com/")
        .field("a", "1")
        .field("a", "2")
        .locale("fr-FR");
    assert_eq!(form.client_id, "login");
    assert_eq!(form.fields.get("a"), Some("2"));
    assert_eq!(form.fields.len(), 1);
    assert_eq!(form.locale.as_deref(), Some("fr-FR"));
    assert!(form.flow_name.is_none());
}
