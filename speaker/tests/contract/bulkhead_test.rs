//! Contract Test: GET / の同時実行制限

use crate::support::{add_speaker, build_app, build_state, send};
use axum::http::{Method, StatusCode};
use serde_json::json;
use speaker::common::error::SpeakerResult;
use std::time::Duration;
use tokio::sync::oneshot;

#[tokio::test]
async fn list_is_rejected_when_bulkhead_is_full() {
    let state = build_state().await;
    let app = build_app(&state);
    add_speaker(&app, json!({"name": "Ada"})).await;

    let max = state.list_bulkhead.max_concurrent();
    assert_eq!(max, 3);

    // 上限まで実行中の呼び出しで枠を埋める
    let mut releases = Vec::new();
    let mut holders = Vec::new();
    for _ in 0..max {
        let (tx, rx) = oneshot::channel::<()>();
        releases.push(tx);
        let bulkhead = state.list_bulkhead.clone();
        holders.push(tokio::spawn(async move {
            bulkhead
                .run(async move {
                    let _ = rx.await;
                    SpeakerResult::Ok(())
                })
                .await
        }));
    }

    for _ in 0..50 {
        if state.list_bulkhead.in_flight() == max {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(state.list_bulkhead.in_flight(), max);

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());

    for tx in releases {
        let _ = tx.send(());
    }
    for holder in holders {
        holder.await.unwrap().unwrap();
    }

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
