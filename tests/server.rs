mod common;

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use common::*;
use profile_badges::server::router;
use profile_badges::{AppState, Config, GitHubSource};

fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

fn configured() -> Config {
    config(&[
        ("GITHUB_USER", LOGIN),
        ("GITHUB_TOKEN", "token"),
        ("CACHE_SECONDS", "600"),
        ("STALE_WHILE_REVALIDATE_SECONDS", "3600"),
    ])
}

fn languages_fake() -> FakeGitHub {
    FakeGitHub {
        language_pages: connection(vec![vec![language_repo(
            "repo",
            &[("Rust", "#dea584", 300), ("Shell", "#89e051", 100)],
        )]]),
        ..Default::default()
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, HashMap<String, String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap().to_string()))
        .collect();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_languages_card_is_cacheable_svg() {
    let source: Arc<dyn GitHubSource> = Arc::new(languages_fake());
    let app = router(AppState::with_source(configured(), Some(source)));

    let (status, headers, body) = get(app, "/api/languages").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE.as_str()].starts_with("image/svg+xml"));
    assert_eq!(
        headers[header::CACHE_CONTROL.as_str()],
        "public, max-age=600, s-maxage=600, stale-while-revalidate=3600"
    );
    assert!(body.starts_with("<svg"));
    assert!(body.contains("Rust 75.00%"));
    assert!(body.contains("Shell 25.00%"));
}

#[tokio::test]
async fn test_cards_are_served_from_cache() {
    let fake = Arc::new(languages_fake());
    let app = router(AppState::with_source(
        configured(),
        Some(fake.clone() as Arc<dyn GitHubSource>),
    ));

    let (_, _, first) = get(app.clone(), "/api/languages").await;
    let calls = fake.call_count();
    let (_, _, second) = get(app, "/api/languages").await;

    assert_eq!(first, second);
    assert_eq!(fake.call_count(), calls);
}

#[tokio::test]
async fn test_missing_token_renders_error_card() {
    let fake = Arc::new(FakeGitHub::default());
    let state = AppState::with_source(
        config(&[("GITHUB_USER", LOGIN)]),
        Some(fake.clone() as Arc<dyn GitHubSource>),
    );

    let (status, headers, body) = get(router(state), "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE.as_str()].starts_with("image/svg+xml"));
    assert!(headers[header::CACHE_CONTROL.as_str()].contains("no-store"));
    assert!(body.contains("GITHUB_TOKEN"));
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_renders_error_card() {
    let broken = profile_badges::models::Page {
        items: Vec::new(),
        page_info: profile_badges::models::PageInfo {
            has_next_page: true,
            end_cursor: None,
        },
    };
    let source: Arc<dyn GitHubSource> = Arc::new(FakeGitHub {
        language_pages: vec![broken],
        ..Default::default()
    });
    let app = router(AppState::with_source(configured(), Some(source)));

    let (status, headers, body) = get(app, "/api/languages").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CACHE_CONTROL.as_str()].contains("no-store"));
    assert!(body.contains("Something went wrong"));
}

#[tokio::test]
async fn test_streak_card_renders() {
    let today = chrono::Utc::now().date_naive();
    let source: Arc<dyn GitHubSource> = Arc::new(FakeGitHub {
        calendar: dense_calendar(
            "2024-01-01",
            &today.to_string(),
            &[(today.to_string().as_str(), 5)],
        ),
        ..Default::default()
    });
    let app = router(AppState::with_source(configured(), Some(source)));

    let (status, _, body) = get(app, "/api/streak").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Current Streak"));
    assert!(body.contains("Longest Streak"));
}

#[tokio::test]
async fn test_health_check() {
    let app = router(AppState::with_source(config(&[]), None));

    let (status, _, body) = get(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
}
