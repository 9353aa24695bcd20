#![allow(dead_code)]

use std::sync::Arc;

use beagle_domain::{ApiConfig, AuthConfig, Config, GraphData, PricePoint, RefreshMode, Session, Suggestion};
use beagle_infra::{ApiClient, CopilotApi, MemorySessionStorage};
use wiremock::MockServer;

/// Client config pointing at the mock server, refreshing through `/refresh-token`.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        api: ApiConfig { base_url: server.uri(), timeout_seconds: 5, user_agent: None },
        auth: AuthConfig { refresh_mode: RefreshMode::Api, ..AuthConfig::default() },
        ..Config::default()
    }
}

pub fn signed_in_session() -> Session {
    Session::authenticated("T1", Some("R1".to_string()), "uid-1", "Login successful")
}

pub fn api_with(server: &MockServer, storage: Arc<MemorySessionStorage>) -> CopilotApi {
    let client = ApiClient::builder()
        .config(config_for(server))
        .persistence(storage)
        .build()
        .expect("client should build");
    CopilotApi::new(client)
}

pub fn suggestion(kind: &str) -> Suggestion {
    Suggestion {
        kind: kind.to_string(),
        box_id: 0,
        item_id: 561,
        price: 210,
        quantity: 5_000,
        name: "Nature rune".to_string(),
        command_id: 1,
        message: String::new(),
    }
}

pub fn graph() -> GraphData {
    GraphData {
        item_id: 561,
        name: "Nature rune".to_string(),
        points: vec![
            PricePoint { timestamp: 1_700_000_000, low: Some(205), high: Some(215) },
            PricePoint { timestamp: 1_700_000_300, low: None, high: Some(216) },
        ],
    }
}

pub fn msgpack<T: serde::Serialize>(value: &T) -> Vec<u8> {
    rmp_serde::to_vec_named(value).expect("value should encode")
}

/// Primary and secondary parts back to back, plus the primary length header value.
pub fn multiplexed(primary: &[u8], secondary: &[u8]) -> (Vec<u8>, String) {
    let mut body = primary.to_vec();
    body.extend_from_slice(secondary);
    (body, primary.len().to_string())
}
