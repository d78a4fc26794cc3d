mod common;

use common::{form_value, has_authorization, mock_client, only_request};
use janrain_capture::{ClientCredentials, EntityKey, Method};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn entity_by_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity"))
        .and(body_string_contains("access_token=at-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "result": {"uuid": "u-1", "email": "jane@example.com", "id": 42}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server).entity("at-1", "user").await.unwrap();
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "has_errors": false,
            "result": {"uuid": "u-1", "email": "jane@example.com", "id": 42}
        })
    );
    assert!(!has_authorization(&only_request(&server).await));
}

#[tokio::test]
async fn entity_with_post_method() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/entity"))
        .and(body_string_contains("access_token=at-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "result": {"uuid": "u-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server)
        .entity_with_method("at-1", "user", Method::Post)
        .await
        .unwrap();
    assert_eq!(outcome.success().unwrap().result["uuid"], json!("u-1"));
}

#[tokio::test]
async fn entity_success_with_null_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "result": null
        })))
        .mount(&server)
        .await;

    let outcome = mock_client(&server).entity("at-1", "user").await.unwrap();
    assert!(outcome.success().unwrap().result.is_empty());
}

#[tokio::test]
async fn entity_by_id_uses_override_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity"))
        .and(basic_auth("support_client", "support_secret"))
        .and(body_string_contains("id=42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "result": {"id": 42}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = ClientCredentials::new("support_client", "support_secret");
    let outcome = mock_client(&server)
        .entity_by_id("42", "user", Some(&credentials))
        .await
        .unwrap();
    assert_eq!(outcome.success().unwrap().result["id"], json!(42));
}

#[tokio::test]
async fn entity_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "error",
            "code": 414,
            "error": "access_token_expired"
        })))
        .mount(&server)
        .await;

    let outcome = mock_client(&server).entity("old", "user").await.unwrap();
    let details = outcome.failure().unwrap();
    assert_eq!(details.error, "access_token_expired");
    assert_eq!(details.code, json!(414));
    assert_eq!(details.error_description, "");
    assert_eq!(details.invalid_fields, json!([]));
}

#[tokio::test]
async fn entity_create_returns_identifiers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity.create"))
        .and(basic_auth("owner_client", "owner_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "id": 7,
            "uuid": "u-7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server)
        .entity_create(&json!({"email": "new@example.com"}), "user", None)
        .await
        .unwrap();
    let created = outcome.success().unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.uuid, "u-7");

    let request = only_request(&server).await;
    assert_eq!(
        form_value(&request, "attributes").as_deref(),
        Some(r#"{"email":"new@example.com"}"#)
    );
}

#[tokio::test]
async fn entity_delete_and_delete_access() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity.delete"))
        .and(basic_auth("owner_client", "owner_secret"))
        .and(body_string_contains("uuid=u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/entity.deleteAccess"))
        .and(basic_auth("owner_client", "owner_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let deleted = client.entity_delete("u-1", "user").await.unwrap();
    assert_eq!(serde_json::to_value(&deleted).unwrap(), json!({"has_errors": false}));
    assert!(client.entity_delete_access("u-1", "user").await.unwrap().is_success());
}

#[tokio::test]
async fn entity_find_encodes_attribute_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity.find"))
        .and(basic_auth("owner_client", "owner_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "result_count": 2,
            "results": [{"uuid": "a"}, {"uuid": "b"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server)
        .entity_find("email = 'jane@example.com'", "user", Some(&["uuid", "email"]), None)
        .await
        .unwrap();
    let search = outcome.success().unwrap();
    assert_eq!(search.result_count, 2);
    assert_eq!(search.results, vec![json!({"uuid": "a"}), json!({"uuid": "b"})]);

    let request = only_request(&server).await;
    assert_eq!(form_value(&request, "attributes").as_deref(), Some(r#"["uuid","email"]"#));
    assert_eq!(
        form_value(&request, "filter").as_deref(),
        Some("email = 'jane@example.com'")
    );
}

#[tokio::test]
async fn entity_find_without_attributes_omits_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity.find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "result_count": 0,
            "results": []
        })))
        .mount(&server)
        .await;

    mock_client(&server)
        .entity_find("email is null", "user", None, None)
        .await
        .unwrap();
    assert_eq!(form_value(&only_request(&server).await, "attributes"), None);
}

#[tokio::test]
async fn entity_update_by_uuid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity.update"))
        .and(basic_auth("owner_client", "owner_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stat": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = mock_client(&server)
        .entity_update("u-1", &json!({"givenName": "Jane"}), "user")
        .await
        .unwrap();
    assert!(outcome.is_success());

    let request = only_request(&server).await;
    assert_eq!(form_value(&request, "uuid").as_deref(), Some("u-1"));
    assert_eq!(form_value(&request, "attributes").as_deref(), Some(r#"{"givenName":"Jane"}"#));
    assert_eq!(form_value(&request, "key_attribute"), None);
}

#[tokio::test]
async fn entity_update_by_key_attribute() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/entity.update"))
        .and(basic_auth("support_client", "support_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "error",
            "code": 310,
            "error": "record_not_found"
        })))
        .mount(&server)
        .await;

    let key = EntityKey::Attribute {
        name: "email".to_string(),
        value: "jane@example.com".to_string(),
    };
    let credentials = ClientCredentials::new("support_client", "support_secret");
    let outcome = mock_client(&server)
        .entity_update_by_key(&key, &json!({"givenName": "Jane"}), "user", Some(&credentials))
        .await
        .unwrap();
    assert_eq!(outcome.failure().unwrap().error, "record_not_found");

    let request = only_request(&server).await;
    assert_eq!(form_value(&request, "key_attribute").as_deref(), Some("email"));
    assert_eq!(form_value(&request, "key_value").as_deref(), Some("jane@example.com"));
    assert_eq!(form_value(&request, "uuid"), None);
}
