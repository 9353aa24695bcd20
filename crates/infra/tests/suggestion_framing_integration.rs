//! Integration tests for suggestion responses over HTTP
//!
//! Covers the msgpack multiplexed body and the JSON fallback end to end.

mod support;

use std::sync::Arc;

use beagle_domain::{AbsentReason, AccountStatus, ApiError};
use beagle_infra::MemorySessionStorage;
use serde_json::json;
use support::{api_with, graph, msgpack, multiplexed, signed_in_session, suggestion};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MSGPACK: &str = "application/x-msgpack";

fn account() -> AccountStatus {
    AccountStatus { display_name: "Zezima".to_string(), is_member: true, ..AccountStatus::default() }
}

async fn serve_suggestion(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/suggestion"))
        .and(header("Authorization", "Bearer T1"))
        .and(header("Accept", MSGPACK))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

fn storage() -> Arc<MemorySessionStorage> {
    Arc::new(MemorySessionStorage::with_session(signed_in_session()))
}

#[tokio::test]
async fn test_decodes_primary_and_graph() {
    let server = MockServer::start().await;
    let (body, primary_len) = multiplexed(&msgpack(&suggestion("buy")), &msgpack(&graph()));
    serve_suggestion(
        &server,
        ResponseTemplate::new(200)
            .insert_header("X-Suggestion-Content-Length", primary_len.as_str())
            .set_body_raw(body, MSGPACK),
    )
    .await;

    let response = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap();

    assert_eq!(response.primary, suggestion("buy"));
    assert_eq!(response.secondary.data(), Some(&graph()));
    assert!(!response.secondary.from_noop_primary());
    let frame = response.frame.unwrap();
    assert_eq!(frame.primary_length(), msgpack(&suggestion("buy")).len());
    assert_eq!(frame.secondary_length(), msgpack(&graph()).len());
}

#[tokio::test]
async fn test_graph_after_wait_is_marked() {
    let server = MockServer::start().await;
    let (body, primary_len) = multiplexed(&msgpack(&suggestion("wait")), &msgpack(&graph()));
    serve_suggestion(
        &server,
        ResponseTemplate::new(200)
            .insert_header("X-Suggestion-Content-Length", primary_len.as_str())
            .set_body_raw(body, MSGPACK),
    )
    .await;

    let response = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap();

    assert!(response.primary.is_wait());
    assert!(response.secondary.from_noop_primary());
}

#[tokio::test]
async fn test_zero_secondary_is_not_available() {
    let server = MockServer::start().await;
    let (body, primary_len) = multiplexed(&msgpack(&suggestion("sell")), &[]);
    serve_suggestion(
        &server,
        ResponseTemplate::new(200)
            .insert_header("X-Suggestion-Content-Length", primary_len.as_str())
            .set_body_raw(body, MSGPACK),
    )
    .await;

    let response = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap();

    assert_eq!(response.primary.kind, "sell");
    assert_eq!(response.secondary.absent_reason(), Some(AbsentReason::NotAvailable));
    assert_eq!(response.secondary.message(), Some("No graph data loaded for this item."));
}

#[tokio::test]
async fn test_undecodable_graph_keeps_primary() {
    let server = MockServer::start().await;
    let (body, primary_len) = multiplexed(&msgpack(&suggestion("buy")), &[0xc1; 16]);
    serve_suggestion(
        &server,
        ResponseTemplate::new(200)
            .insert_header("X-Suggestion-Content-Length", primary_len.as_str())
            .set_body_raw(body, MSGPACK),
    )
    .await;

    let response = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap();

    assert_eq!(response.primary, suggestion("buy"));
    assert!(response.secondary.is_failed());
    assert_eq!(
        response.secondary.message(),
        Some("There was an issue loading the graph data for this item.")
    );
}

#[tokio::test]
async fn test_primary_longer_than_body_is_malformed() {
    let server = MockServer::start().await;
    let primary = msgpack(&suggestion("buy"));
    serve_suggestion(
        &server,
        ResponseTemplate::new(200)
            .insert_header("X-Suggestion-Content-Length", (primary.len() + 10).to_string().as_str())
            .set_body_raw(primary, MSGPACK),
    )
    .await;

    let err = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_missing_primary_length_header_is_malformed() {
    let server = MockServer::start().await;
    serve_suggestion(
        &server,
        ResponseTemplate::new(200).set_body_raw(msgpack(&suggestion("buy")), MSGPACK),
    )
    .await;

    let err = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap_err();

    assert!(matches!(err, ApiError::Malformed { .. }));
}

#[tokio::test]
async fn test_json_fallback_has_no_graph() {
    let server = MockServer::start().await;
    serve_suggestion(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "type": "buy",
            "item_id": 561,
            "price": 210,
            "quantity": 5000,
            "name": "Nature rune"
        })),
    )
    .await;

    let response = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap();

    assert_eq!(response.primary.item_id, 561);
    assert_eq!(response.secondary.absent_reason(), Some(AbsentReason::UnsupportedFormat));
    assert!(response.frame.is_none());
}

#[tokio::test]
async fn test_undecodable_primary_is_a_decode_error() {
    let server = MockServer::start().await;
    let (body, primary_len) = multiplexed(&[0xc1; 8], &msgpack(&graph()));
    serve_suggestion(
        &server,
        ResponseTemplate::new(200)
            .insert_header("X-Suggestion-Content-Length", primary_len.as_str())
            .set_body_raw(body, MSGPACK),
    )
    .await;

    let err = api_with(&server, storage()).fetch_suggestion(&account()).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}
