//! Contract Test: GET /metrics

use crate::support::{add_speaker, build_app, build_state, send};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn metrics_expose_operation_counters() {
    let state = build_state().await;
    let app = build_app(&state);

    add_speaker(&app, json!({"name": "Ada"})).await;
    send(&app, Method::GET, "/", None).await;
    send(&app, Method::GET, "/", None).await;
    send(&app, Method::POST, "/updateHealthStatus?isAppDown=false", None).await;

    assert_eq!(state.metrics.call_count("add"), 1);
    assert_eq!(state.metrics.call_count("retrieveAll"), 2);

    let (status, body) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains(r#"speaker_requests_total{operation="retrieveAll"} 2"#), "{text}");
    assert!(text.contains(r#"speaker_requests_total{operation="add"} 1"#));
    assert!(text.contains("speaker_list_duration_seconds_count 2"));
    assert!(text.contains("speaker_health_status_updates_total 1"));
}

#[tokio::test]
async fn ness_probe_calls_are_counted() {
    let state = build_state().await;
    let app = build_app(&state);

    send(&app, Method::GET, "/nessProbe", None).await;
    send(&app, Method::GET, "/nessProbe", None).await;
    assert_eq!(state.metrics.call_count("nessProbe"), 2);

    let (_, body) = send(&app, Method::GET, "/metrics", None).await;
    let text = body.as_str().unwrap();
    assert!(text.contains(r#"speaker_requests_total{operation="nessProbe"} 2"#), "{text}");
}
