mod common;

use common::mock_client;
use janrain_capture::JanrainError;
use janrain_types::{FieldReference, FlowVersion};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn flow_versions_wraps_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/app123/flows/standard/versions"))
        .and(basic_auth("owner_client", "owner_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"change": "a1b2", "version": "20240101"},
            {"change": "c3d4", "version": "20240202"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server).flow_versions().await.unwrap();
    assert_eq!(
        outcome.success().unwrap().versions,
        vec![
            FlowVersion {
                change: "a1b2".into(),
                version: "20240101".into(),
            },
            FlowVersion {
                change: "c3d4".into(),
                version: "20240202".into(),
            },
        ]
    );
}

#[tokio::test]
async fn flow_versions_rejection_reports_errors_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/app123/flows/standard/versions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": "flow not found"
        })))
        .mount(&server)
        .await;

    let outcome = mock_client(&server).flow_versions().await.unwrap();
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "has_errors": true,
            "error": "",
            "code": "",
            "error_description": "",
            "invalid_fields": "flow not found"
        })
    );
}

#[tokio::test]
async fn form_configuration_lists_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/app123/flows/standard/forms/signInForm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_self": "/config/app123/flows/standard/forms/signInForm",
            "fields": [
                {"_self": "/config/app123/flows/standard/fields/email", "name": "email", "required": true},
                {"_self": "/config/app123/flows/standard/fields/password", "name": "password", "required": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server).form_configuration("signInForm").await.unwrap();
    let layout = outcome.success().unwrap();
    assert_eq!(layout.self_link, "/config/app123/flows/standard/forms/signInForm");
    assert_eq!(
        layout.fields[0],
        FieldReference {
            name: "email".into(),
            required: true,
            self_link: "/config/app123/flows/standard/fields/email".into(),
        }
    );
    assert_eq!(layout.fields.len(), 2);
}

#[tokio::test]
async fn field_configuration_returns_descriptor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/app123/flows/standard/fields/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "email",
            "label": {"key": "abc123"},
            "schemaId": "email"
        })))
        .mount(&server)
        .await;

    let outcome = mock_client(&server).field_configuration("email").await.unwrap();
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "has_errors": false,
            "result": {"type": "email", "label": {"key": "abc123"}, "schemaId": "email"}
        })
    );
}

#[tokio::test]
async fn field_configuration_rejects_non_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/app123/flows/standard/fields/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["email"])))
        .mount(&server)
        .await;

    let err = mock_client(&server).field_configuration("email").await.unwrap_err();
    assert!(matches!(err, JanrainError::Types(_)));
}
