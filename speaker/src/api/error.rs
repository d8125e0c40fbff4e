//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::SpeakerError;
use axum::{response::IntoResponse, Json};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub SpeakerError);

impl From<SpeakerError> for AppError {
    fn from(err: SpeakerError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // クライアントには external_message() のみ返し、詳細はログに残す
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        (status, Json(self.0.to_error_body())).into_response()
    }
}
