//! テスト共通ヘルパー

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use speaker::{api, config::SpeakerConfig, db, AppState};
use std::sync::Arc;
use tower::ServiceExt;

/// リンク生成に使う公開URL
pub const BASE_URL: &str = "http://speaker.test";

/// インメモリDBでアプリケーション状態を構築
pub async fn build_state() -> AppState {
    build_state_with(SpeakerConfig {
        public_url: Some(BASE_URL.to_string()),
        ..SpeakerConfig::default()
    })
    .await
}

/// 設定を指定してアプリケーション状態を構築
pub async fn build_state_with(config: SpeakerConfig) -> AppState {
    let pool = db::initialize_database("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    AppState::new(Arc::new(pool), config).expect("Failed to build app state")
}

/// Routerを構築
pub fn build_app(state: &AppState) -> Router {
    api::create_app(state.clone())
}

/// リクエストを送信し、ステータスとボディを返す
///
/// ボディが空なら `Value::Null`、JSONでなければ文字列として返す。
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// スピーカーを登録し、レスポンスを返す
pub async fn add_speaker(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, Method::POST, "/add", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "add failed: {created}");
    created
}
