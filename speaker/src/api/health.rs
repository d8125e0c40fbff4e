//! 準備完了プローブとヘルス状態API

use crate::health::HealthStatus;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

/// `POST /updateHealthStatus` のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct HealthStatusQuery {
    /// trueで停止中として報告する
    #[serde(rename = "isAppDown")]
    pub is_app_down: bool,
}

/// `GET /health` のレスポンス
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 現在の状態
    pub status: HealthStatus,
}

/// GET /nessProbe - 準備完了メッセージ
pub async fn ness_probe(State(state): State<AppState>) -> String {
    state.metrics.record_call("nessProbe");
    let now = chrono::Local::now();
    format!("speaker ready at {}", now.format("%a %b %d %H:%M:%S %Z %Y"))
}

/// POST /updateHealthStatus?isAppDown=bool - ヘルス状態を切り替える
pub async fn update_health_status(
    State(state): State<AppState>,
    Query(query): Query<HealthStatusQuery>,
) -> StatusCode {
    state.health.set_down(query.is_app_down);
    state.metrics.record_health_status_update();
    StatusCode::OK
}

/// GET /health - 現在のヘルス状態
///
/// 停止中フラグが立っている間は503を返す。
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = state.health.status();
    let code = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(HealthResponse { status }))
}
