//! tests/global_errors/401.rs
//! The catch-all route is flagged isauth, so authentication runs before it.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_401_without_token() {
    let base_url: String = common::spawn_authenticated_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/does-not-exist", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json: Value = serde_json::from_str(&resp.text().await.unwrap()).unwrap();
    assert_eq!(json["status"], "UNAUTHORIZED");
    assert_eq!(json["code"], 401);
    assert_eq!(json["data"]["error"], "missing_token");
}

#[tokio::test]
async fn returns_401_for_unknown_token() {
    let base_url: String = common::spawn_authenticated_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/does-not-exist", base_url))
        .bearer_auth("wrong")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_not_found_handler() {
    let base_url: String = common::spawn_authenticated_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/does-not-exist", base_url))
        .bearer_auth(common::TOKEN)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let base_url: String = common::spawn_authenticated_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/status", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::OK);
}
