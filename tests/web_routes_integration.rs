//! Web Routes Integration Tests
//!
//! Tests without a GitHub token run offline against the full router. The
//! ignored ones need a real GitHub API token in the GITHUB_TOKEN environment
//! variable and hit the real GitHub API.
//!
//! Run with: cargo test --test web_routes_integration -- --include-ignored

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Datelike, Utc};
use github_wrapped::config::AppConfig;
use github_wrapped::web::{AppState, app_router};
use http_body_util::BodyExt as _; // for collect()
use tower::ServiceExt; // for oneshot()

mod common;

fn offline_app() -> axum::Router {
    app_router(AppState::shared(AppConfig::default()))
}

fn live_app() -> axum::Router {
    app_router(AppState::shared(common::setup_integration_test()))
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_wrapped_without_token_is_unavailable() {
    let resp = offline_app()
        .oneshot(get("/api/wrapped?username=octocat"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = json_body(resp).await;
    assert_eq!(json["error"], "GitHub API token not configured");
}

#[tokio::test]
async fn test_wrapped_rejects_future_year() {
    let next_year = Utc::now().year() + 1;
    let resp = offline_app()
        .oneshot(get(&format!("/api/wrapped?username=octocat&year={next_year}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = json_body(resp).await;
    let error_msg = json["error"].as_str().unwrap_or("");
    assert!(error_msg.contains(&next_year.to_string()));
}

#[tokio::test]
async fn test_malformed_query_returns_json_error() {
    for uri in ["/api/wrapped", "/api/share?username=octocat&year=soon"] {
        let resp = offline_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        assert_eq!(content_type, "application/json", "{uri}");

        let json = json_body(resp).await;
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()), "{uri}");
    }
}

#[tokio::test]
async fn test_routes_are_mounted_under_api() {
    let resp = offline_app()
        .oneshot(get("/wrapped?username=octocat"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_version_and_empty_cache() {
    let resp = offline_app().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(
        headers.get("x-app-version").and_then(|v| v.to_str().ok()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert_eq!(
        headers.get("x-cache-entries").and_then(|v| v.to_str().ok()),
        Some("0")
    );
    assert!(headers.get("x-github-ratelimit-remaining").is_none());
}

#[tokio::test]
#[ignore = "requires GITHUB_TOKEN and network access"]
async fn test_wrapped_with_real_user() {
    let username = common::get_test_username();
    let year = Utc::now().year() - 1;
    let resp = live_app()
        .oneshot(get(&format!("/api/wrapped?username={username}&year={year}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    assert_eq!(json["year"], year);
    assert!(json["longestStreak"].as_u64() >= json["currentStreak"].as_u64());
    assert!(json["languages"].as_array().is_some_and(|l| l.len() <= 5));
    assert!(json["roast"].as_str().is_some_and(|r| !r.is_empty()));

    println!("✓ Successfully built wrapped {} for user: {}", year, username);
}

#[tokio::test]
#[ignore = "requires GITHUB_TOKEN and network access"]
async fn test_wrapped_with_nonexistent_user() {
    let username = common::get_invalid_username();
    let resp = live_app()
        .oneshot(get(&format!("/api/wrapped?username={username}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = json_body(resp).await;
    let error_msg = json["error"].as_str().unwrap_or("");
    assert!(error_msg.contains("User not found"));
}

#[tokio::test]
#[ignore = "requires GITHUB_TOKEN and network access"]
async fn test_share_with_real_user() {
    let username = common::get_test_username();
    let resp = live_app()
        .oneshot(get(&format!(
            "/api/share?username={username}&year={}&theme=retro",
            Utc::now().year() - 1
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = json_body(resp).await;
    let og_image_url = json["ogImageUrl"].as_str().unwrap_or("");
    assert!(og_image_url.starts_with("/api/og?"));
    assert!(og_image_url.contains("theme=retro"));
    assert_eq!(json["ogImageWidth"], 1080);
    assert_eq!(json["ogImageHeight"], 1350);
}

#[tokio::test]
#[ignore = "requires GITHUB_TOKEN and network access"]
async fn test_health_reports_rate_limit_after_fetch() {
    let app = live_app();
    let username = common::get_test_username();

    let resp = app
        .clone()
        .oneshot(get(&format!("/api/wrapped?username={username}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/api/health")).await.unwrap();
    let headers = resp.headers();
    assert!(headers.get("x-github-ratelimit-limit").is_some());
    assert!(headers.get("x-github-ratelimit-remaining").is_some());
}
