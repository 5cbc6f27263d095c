//! Request pipeline against a mock API server.

mod common;

use axum::http::{Method as HttpMethod, StatusCode};
use serde_json::json;

use common::{MockServer, API_KEY, API_SECRET};
use mrr_cli::api_client::{ApiRequest, Query, FALLBACK_ERROR, USER_AGENT};
use mrr_cli::auth::{Credentials, Signer};
use mrr_cli::Error;

fn expected_signature(endpoint: &str, nonce: &str) -> String {
    let signer = Signer::new(Credentials::new(API_KEY, API_SECRET).unwrap());
    signer
        .sign_with_nonce(endpoint, nonce.parse().unwrap())
        .signature
}

#[tokio::test]
async fn test_ok_returns_body_unchanged() {
    let server = MockServer::echo().await;
    let client = server.client();
    let body = json!({ "type": "standard", "rig": 12345, "nested": { "list": [1, 2.5, null] } });

    let result = client
        .send(&ApiRequest::put("/rental", body.clone()))
        .await
        .unwrap();

    assert_eq!(result, body);
}

#[tokio::test]
async fn test_error_message_extracted() {
    let server =
        MockServer::replying(StatusCode::BAD_REQUEST, r#"{"message": "bad request"}"#).await;

    let err = server.client().whoami().await.unwrap_err();

    assert!(matches!(err, Error::Api(ref m) if m == "bad request"), "{err:?}");
}

#[tokio::test]
async fn test_unparsable_error_body_falls_back() {
    let server =
        MockServer::replying(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await;

    let err = server.client().whoami().await.unwrap_err();

    assert!(matches!(err, Error::Api(ref m) if m == FALLBACK_ERROR), "{err:?}");
}

#[tokio::test]
async fn test_only_200_counts_as_success() {
    let server = MockServer::replying(StatusCode::CREATED, r#"{"id": 1}"#).await;

    let err = server.client().create_rental(json!({})).await.unwrap_err();

    assert!(matches!(err, Error::Api(ref m) if m == FALLBACK_ERROR), "{err:?}");
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let server = MockServer::replying(StatusCode::OK, "not json").await;

    let err = server.client().whoami().await.unwrap_err();

    assert!(matches!(err, Error::Json(_)), "{err:?}");
}

#[tokio::test]
async fn test_connection_failure_is_not_normalized() {
    let client = common::unreachable_client().await;

    let err = client.whoami().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn test_auth_headers_sign_path_without_query() {
    let server = MockServer::echo().await;
    let client = server.client();
    let query = Query::from([("x".to_string(), "1".to_string())]);

    client
        .send(&ApiRequest::get_with_query("/info/algos", query))
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::GET);
    assert_eq!(request.path, "/info/algos");
    assert_eq!(request.query.as_deref(), Some("x=1"));
    assert!(request.body.is_empty());

    assert_eq!(request.header("x-api-key"), API_KEY);
    assert_eq!(request.header("user-agent"), USER_AGENT);

    let nonce = request.header("x-api-nonce");
    assert!(nonce.parse::<u64>().unwrap() > 0);
    assert_eq!(
        request.header("x-api-sign"),
        expected_signature("/info/algos", nonce)
    );
}

#[tokio::test]
async fn test_signature_excludes_base_url_prefix() {
    let server = MockServer::echo().await;
    let client = server.client_with_prefix("/api/v2");

    client.account_balance().await.unwrap();

    let request = &server.requests()[0];
    assert_eq!(request.path, "/api/v2/account/balance");
    assert_eq!(
        request.header("x-api-sign"),
        expected_signature("/account/balance", request.header("x-api-nonce"))
    );
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let server = MockServer::echo().await;
    let body = json!({ "name": "profile", "algo": "sha256" });

    server
        .client()
        .send(&ApiRequest::put("/account/profile", body.clone()))
        .await
        .unwrap();

    let request = &server.requests()[0];
    assert_eq!(request.method, HttpMethod::PUT);
    assert_eq!(request.header("content-type"), "application/json");
    assert_eq!(request.json_body(), body);
}

#[tokio::test]
async fn test_delete_has_no_body() {
    let server = MockServer::echo().await;

    server
        .client()
        .send(&ApiRequest::delete("/account/profile/9"))
        .await
        .unwrap();

    let request = &server.requests()[0];
    assert_eq!(request.method, HttpMethod::DELETE);
    assert_eq!(request.path, "/account/profile/9");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_nonces_increase_across_requests() {
    let server = MockServer::echo().await;
    let client = server.client();

    for _ in 0..3 {
        client.whoami().await.unwrap();
    }

    let nonces: Vec<u64> = server
        .requests()
        .iter()
        .map(|r| r.header("x-api-nonce").parse().unwrap())
        .collect();
    assert!(nonces.windows(2).all(|w| w[1] > w[0]), "{nonces:?}");
}
