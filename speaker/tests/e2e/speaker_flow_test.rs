//! E2E: スピーカー登録から削除までの一連の流れ

use crate::support::build_state_with;
use reqwest::StatusCode;
use serde_json::{json, Value};
use speaker::config::SpeakerConfig;
use speaker::server;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn speaker_lifecycle_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = build_state_with(SpeakerConfig::default()).await;
    let shutdown = state.shutdown.clone();
    let server_task = tokio::spawn(server::serve(state, listener));

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let probe = client
        .get(format!("{base}/nessProbe"))
        .send()
        .await
        .unwrap();
    assert_eq!(probe.status(), StatusCode::OK);
    assert!(probe.text().await.unwrap().starts_with("speaker ready at "));

    let created: Value = client
        .post(format!("{base}/add"))
        .json(&json!({"name": "Ada Lovelace", "twitterHandle": "@ada"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    // Hostヘッダーからリンクを組み立てる
    let self_link = created["links"]["self"].as_str().unwrap().to_string();
    assert_eq!(self_link, format!("{base}/retrieve/{id}"));

    let fetched: Value = client.get(&self_link).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["twitterHandle"], "@ada");

    let updated = client
        .put(format!("{base}/update"))
        .json(&json!({"id": id, "name": "Ada King"}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);

    let found: Value = client
        .put(format!("{base}/search"))
        .json(&json!({"name": "king"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found.as_array().unwrap().len(), 1);

    let remove_link = created["links"]["remove"].as_str().unwrap().to_string();
    let removed = client.delete(&remove_link).send().await.unwrap();
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let all: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(all, json!([]));

    shutdown.request_shutdown();
    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server did not shut down")
        .expect("server task panicked")
        .expect("server returned error");
}
