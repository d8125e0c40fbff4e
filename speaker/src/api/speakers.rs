//! スピーカーAPIハンドラー
//!
//! HTTP操作をストア操作に対応付け、レスポンスにハイパーメディアリンクを付与する。
//! 故障注入用の2エンドポイントと、サーキットブレーカー付き検索もここで扱う。

use super::error::AppError;
use crate::common::error::{SpeakerError, SpeakerResult};
use crate::db::SpeakerStore;
use crate::links::{add_hypermedia, base_uri_from_headers};
use crate::resilience::with_fallback;
use crate::types::Speaker;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

/// リクエストに対応するベースURI
fn base_uri(state: &AppState, headers: &HeaderMap) -> String {
    let fallback = format!("http://localhost:{}", state.config.port);
    base_uri_from_headers(headers, state.config.public_url.as_deref(), &fallback)
}

/// GET / - 全スピーカーを取得
///
/// バルクヘッドで同時実行数を制限し、上限を超えた呼び出しは503で拒否する。
pub async fn retrieve_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Speaker>>, AppError> {
    state.metrics.record_call("retrieveAll");
    let _timer = state.metrics.start_list_timer();

    let speakers = state.list_bulkhead.run(state.store.list()).await?;

    let base = base_uri(&state, &headers);
    Ok(Json(
        speakers
            .into_iter()
            .map(|speaker| add_hypermedia(&base, speaker))
            .collect(),
    ))
}

/// POST /add - スピーカーを登録
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(speaker): Json<Speaker>,
) -> Result<Json<Speaker>, AppError> {
    state.metrics.record_call("add");

    let created = state.store.insert(&speaker).await?;
    tracing::info!(speaker_id = ?created.id, "Speaker added");

    Ok(Json(add_hypermedia(&base_uri(&state, &headers), created)))
}

/// DELETE /remove/:id - スピーカーを削除
///
/// 存在しないIDでも成功（204）として扱う。
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.metrics.record_call("remove");

    state.store.delete_by_id(&id).await?;
    tracing::info!(speaker_id = %id, "Speaker removed");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /update - スピーカーを全置換で更新
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(speaker): Json<Speaker>,
) -> Result<Json<Speaker>, AppError> {
    state.metrics.record_call("update");

    let updated = state.store.update(&speaker).await?;

    Ok(Json(add_hypermedia(&base_uri(&state, &headers), updated)))
}

/// GET /retrieve/:id - スピーカーを取得
///
/// 見つからない場合も404ではなく、IDなしの空スピーカーを返す。
pub async fn retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Speaker>, AppError> {
    state.metrics.record_call("retrieve");

    let speaker = state.store.get_by_id(&id).await?.unwrap_or_default();

    Ok(Json(add_hypermedia(&base_uri(&state, &headers), speaker)))
}

async fn failing_service() -> SpeakerResult<Speaker> {
    Err(SpeakerError::Internal("Retrieve service failed!".to_string()))
}

/// GET /failingService - 常に失敗し、フォールバックで空スピーカーを返す
pub async fn retrieve_failing_service(State(state): State<AppState>) -> Json<Speaker> {
    state.metrics.record_call("retrieveFailingService");

    Json(with_fallback("failingService", failing_service(), Speaker::empty).await)
}

/// GET /failingServiceWithoutAnnotation - 常に失敗し、エラーをそのまま返す
pub async fn retrieve_failing_service_without_annotation(
    State(state): State<AppState>,
) -> Result<Json<Speaker>, AppError> {
    state
        .metrics
        .record_call("retrieveFailingServiceWithoutAnnotation");

    Err(SpeakerError::Internal("Service Failed!".to_string()).into())
}

async fn search_failure(
    store: &dyn SpeakerStore,
    template: &Speaker,
) -> SpeakerResult<Vec<Speaker>> {
    if crate::config::is_service_broken() {
        return Err(SpeakerError::Internal("Breaking Service failed!".to_string()));
    }
    store.find(template).await
}

/// PUT /search - テンプレートに一致するスピーカーを検索
///
/// サーキットブレーカー越しに実行し、失敗時（ブレーカーによる拒否を含む）は
/// 空の集合を返す。
pub async fn search(
    State(state): State<AppState>,
    Json(template): Json<Speaker>,
) -> Json<Vec<Speaker>> {
    state.metrics.record_call("searchFailure");

    let speakers = with_fallback(
        "search",
        state
            .search_breaker
            .call(|| search_failure(state.store.as_ref(), &template)),
        Vec::new,
    )
    .await;

    Json(speakers)
}
