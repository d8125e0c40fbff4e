//! Contract Test: PUT /search
//!
//! 故障注入フラグ（環境変数）を切り替えるため、すべて直列に実行する。

use crate::support::{add_speaker, build_app, build_state, build_state_with, send, BASE_URL};
use axum::http::{Method, StatusCode};
use serde_json::json;
use serial_test::serial;
use speaker::config::{CircuitBreakerConfig, SpeakerConfig};
use speaker::resilience::CircuitState;
use std::time::Duration;

const BROKEN_FLAG: &str = "SPEAKER_BREAKING_SERVICE_BROKEN";

struct BrokenGuard;

impl BrokenGuard {
    fn set() -> Self {
        std::env::set_var(BROKEN_FLAG, "true");
        BrokenGuard
    }
}

impl Drop for BrokenGuard {
    fn drop(&mut self) {
        std::env::remove_var(BROKEN_FLAG);
    }
}

fn clear_flags() {
    std::env::remove_var(BROKEN_FLAG);
    std::env::remove_var("BREAKING_SERVICE_BROKEN");
}

#[tokio::test]
#[serial]
async fn search_matches_template_fields() {
    clear_flags();
    let state = build_state().await;
    let app = build_app(&state);

    add_speaker(&app, json!({"name": "Ada Lovelace", "organization": "Analytical"})).await;
    add_speaker(&app, json!({"name": "Grace Hopper", "organization": "Navy"})).await;
    add_speaker(&app, json!({"name": "Alan Turing", "organization": "Bletchley"})).await;

    let (status, body) = send(&app, Method::PUT, "/search", Some(json!({"name": "a"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::PUT, "/search", Some(json!({"name": "grace"}))).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "Grace Hopper");
    // 検索結果にはリンクを付与しない
    assert!(results[0]["links"].as_object().unwrap().is_empty());

    let (_, body) = send(
        &app,
        Method::PUT,
        "/search",
        Some(json!({"name": "a", "organization": "navy"})),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::PUT, "/search", Some(json!({"name": "nobody"}))).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[serial]
async fn search_with_empty_template_returns_all() {
    clear_flags();
    let state = build_state().await;
    let app = build_app(&state);

    add_speaker(&app, json!({"name": "Ada"})).await;
    add_speaker(&app, json!({"name": "Grace"})).await;

    let (status, body) = send(&app, Method::PUT, "/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[serial]
async fn broken_search_falls_back_to_empty_list() {
    clear_flags();
    let state = build_state().await;
    let app = build_app(&state);
    add_speaker(&app, json!({"name": "Ada"})).await;

    let _broken = BrokenGuard::set();
    let (status, body) = send(&app, Method::PUT, "/search", Some(json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[serial]
async fn repeated_failures_open_the_circuit() {
    clear_flags();
    let state = build_state().await;
    let app = build_app(&state);
    add_speaker(&app, json!({"name": "Ada"})).await;

    {
        let _broken = BrokenGuard::set();
        send(&app, Method::PUT, "/search", Some(json!({"name": "Ada"}))).await;
        send(&app, Method::PUT, "/search", Some(json!({"name": "Ada"}))).await;
    }
    assert_eq!(state.search_breaker.state(), CircuitState::Open);

    // 故障が解消してもオープン中は拒否され、フォールバックが返る
    let (status, body) = send(&app, Method::PUT, "/search", Some(json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(state.metrics.call_count("searchFailure"), 3);
}

#[tokio::test]
#[serial]
async fn circuit_recovers_after_delay() {
    clear_flags();
    let state = build_state_with(SpeakerConfig {
        public_url: Some(BASE_URL.to_string()),
        circuit_breaker: CircuitBreakerConfig {
            delay_ms: 50,
            ..CircuitBreakerConfig::default()
        },
        ..SpeakerConfig::default()
    })
    .await;
    let app = build_app(&state);
    add_speaker(&app, json!({"name": "Ada"})).await;

    {
        let _broken = BrokenGuard::set();
        send(&app, Method::PUT, "/search", Some(json!({}))).await;
        send(&app, Method::PUT, "/search", Some(json!({}))).await;
    }
    assert_eq!(state.search_breaker.state(), CircuitState::Open);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let (_, body) = send(&app, Method::PUT, "/search", Some(json!({}))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(state.search_breaker.state(), CircuitState::HalfOpen);

    let (_, body) = send(&app, Method::PUT, "/search", Some(json!({}))).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(state.search_breaker.state(), CircuitState::Closed);
}
