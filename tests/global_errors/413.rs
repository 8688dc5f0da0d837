//! tests/global_errors/413.rs
//! Ensures that a payload above MAX_REQUEST_BODY_SIZE triggers a JSON 413.

use reqwest::StatusCode;
use restapi::{EnvironmentVariables, ModuleConfig};
use serde_json::Value;

use crate::common;

const LIMIT: usize = 16;

fn spawn_limited_app() -> String {
    let env: EnvironmentVariables = EnvironmentVariables {
        max_request_body_size: LIMIT,
        ..EnvironmentVariables::default()
    };

    common::spawn_app_with(env, ModuleConfig::builtin())
}

async fn post(url: String, payload: Vec<u8>) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .body(payload)
        .send()
        .await
        .expect("Failed to send request.")
}

#[tokio::test]
async fn returns_413_when_payload_exceeds_limit() {
    let base_url: String = spawn_limited_app();

    let resp: reqwest::Response = post(format!("{}/status", base_url), vec![b'X'; 4096]).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: String = resp.text().await.unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);
}

#[tokio::test]
async fn unmatched_route_with_oversized_payload_is_413() {
    let base_url: String = spawn_limited_app();

    // The fallback controller is still dispatched, so the limit applies there too
    let resp: reqwest::Response = post(format!("{}/foo/bar", base_url), vec![b'X'; LIMIT + 1]).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn accepts_payload_at_limit() {
    let base_url: String = spawn_limited_app();

    let resp: reqwest::Response = post(format!("{}/status", base_url), vec![b'X'; LIMIT]).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
