//! フォールバック
//!
//! 失敗した呼び出しの結果を代替値に置き換える。

use crate::common::error::SpeakerResult;
use std::future::Future;

/// `operation` が失敗した場合に `fallback` の値を返す
pub async fn with_fallback<T, Fut, F>(name: &str, operation: Fut, fallback: F) -> T
where
    Fut: Future<Output = SpeakerResult<T>>,
    F: FnOnce() -> T,
{
    match operation.await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(operation = name, error = %err, "Falling back after failure");
            fallback()
        }
    }
}
