//! Prometheusメトリクス公開API

use super::error::AppError;
use crate::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

/// GET /metrics - Prometheusテキスト形式でメトリクスを返す
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.metrics.encode()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
