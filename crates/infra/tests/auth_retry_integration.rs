//! Integration tests for the refresh-on-401 policy
//!
//! Exercises the full stack: endpoint operation, API client, session store,
//! refresh transport and persistence.

mod support;

use std::sync::Arc;

use beagle_domain::{ApiError, Session};
use beagle_infra::{ApiClient, CopilotApi, FileSessionStorage, MemorySessionStorage};
use serde_json::json;
use support::{api_with, config_for, signed_in_session};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_refresh(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .and(body_json(json!({"refreshToken": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id_token": "T2"})))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/premium-instances/status"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/premium-instances/status"))
        .and(header("Authorization", "Bearer T2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"premium_instances_count": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::with_session(signed_in_session()));
    let api = api_with(&server, Arc::clone(&storage));
    let status = api.premium_instance_status().await.unwrap();

    assert_eq!(status.premium_instances_count, 3);
    let session = api.client().session().current().await.unwrap();
    assert_eq!(session.token, "T2");
    assert_eq!(session.refresh_token.as_deref(), Some("R1"));
    assert_eq!(storage.snapshot().map(|s| s.token), Some("T2".to_string()));
}

#[tokio::test]
async fn test_second_401_expires_session_after_exactly_two_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/premium-instances/status"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, 1).await;

    let storage = Arc::new(MemorySessionStorage::with_session(signed_in_session()));
    let api = api_with(&server, Arc::clone(&storage));
    let err = api.premium_instance_status().await.unwrap_err();

    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(err.outcome().http_status, 401);
    assert!(!api.client().session().is_authenticated().await);
    assert!(storage.snapshot().is_none());

    // No further network traffic once the session is gone.
    let err = api.premium_instance_status().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
}

#[tokio::test]
async fn test_concurrent_rejections_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/premium-instances/status"))
        .and(header("Authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_refresh(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/premium-instances/status"))
        .and(header("Authorization", "Bearer T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let api = api_with(&server, Arc::new(MemorySessionStorage::with_session(signed_in_session())));
    let (first, second) = tokio::join!(api.premium_instance_status(), api.premium_instance_status());

    assert!(first.is_ok());
    assert!(second.is_ok());
}

#[tokio::test]
async fn test_login_session_survives_restart_until_expired() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idToken": "T1",
            "uid": "uid-1",
            "refreshToken": "R1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/premium-instances/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "revoked"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let session_path = dir.path().join("beagle/session.json");
    let client_for_file = || {
        let client = ApiClient::builder()
            .config(config_for(&server))
            .persistence(Arc::new(FileSessionStorage::new(&session_path)))
            .build()
            .unwrap();
        CopilotApi::new(client)
    };

    let first = client_for_file();
    first.login("a@b.c", "hunter2").await.unwrap();
    first.client().session().flush().await;
    assert!(session_path.exists());

    let restarted = client_for_file();
    let restored = restarted.client().session().current().await;
    assert_eq!(
        restored,
        Some(Session::authenticated("T1", Some("R1".to_string()), "uid-1", "Login successful"))
    );

    let err = restarted.premium_instance_status().await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
    assert!(!session_path.exists());
}
