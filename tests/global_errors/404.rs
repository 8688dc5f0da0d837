//! tests/global_errors/404.rs
//! Ensures that hitting an unknown route returns the JSON 404 payload.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

async fn get_json(url: String) -> (StatusCode, Value) {
    let resp: reqwest::Response = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .expect("Failed to execute request.");

    let status: StatusCode = resp.status();
    let body: String = resp.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = common::spawn_app();

    let (status, json) = get_json(format!("{}/foo/bar", base_url)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "NOT_FOUND");
    assert_eq!(json["code"], 404);
    assert_eq!(json["data"]["message"], "not found");
}

#[tokio::test]
async fn every_depth_up_to_six_gets_the_same_payload() {
    let base_url: String = common::spawn_app();
    let mut path: String = String::new();
    let mut payloads: Vec<Value> = Vec::new();

    for depth in 0..=6 {
        let (status, json) = get_json(format!("{}{}/", base_url, path)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "depth {depth}");

        payloads.push(json["data"].clone());
        path.push_str(&format!("/level{depth}"));
    }

    assert!(payloads.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn deeper_paths_still_return_json_404() {
    let base_url: String = common::spawn_app();

    let (status, json) = get_json(format!("{}/a/b/c/d/e/f/g/h", base_url)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["message"], "not found");
}

#[tokio::test]
async fn not_found_applies_to_every_method() {
    let base_url: String = common::spawn_app();

    let resp: reqwest::Response = reqwest::Client::new()
        .delete(format!("{}/orders/17", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
}
