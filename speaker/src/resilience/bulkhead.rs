//! バルクヘッド（同時実行数の上限）
//!
//! 空き枠がない呼び出しは待たせずに `SpeakerError::BulkheadFull` で拒否する。

use crate::common::error::{SpeakerError, SpeakerResult};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// 名前付きバルクヘッド（Cloneで枠を共有）
#[derive(Debug, Clone)]
pub struct Bulkhead {
    name: Arc<str>,
    max_concurrent: usize,
    permits: Arc<Semaphore>,
}

impl Bulkhead {
    /// 同時実行上限 `max_concurrent` のバルクヘッドを作成
    pub fn new(name: &str, max_concurrent: usize) -> Self {
        Self {
            name: Arc::from(name),
            max_concurrent,
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// 同時実行上限
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// 現在実行中の呼び出し数
    pub fn in_flight(&self) -> usize {
        self.max_concurrent
            .saturating_sub(self.permits.available_permits())
    }

    /// 枠を確保して `operation` を実行する。枠は完了（またはキャンセル）時に返却される。
    pub async fn run<T, Fut>(&self, operation: Fut) -> SpeakerResult<T>
    where
        Fut: Future<Output = SpeakerResult<T>>,
    {
        let _permit = match self.permits.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                tracing::warn!(
                    bulkhead = %self.name,
                    max_concurrent = self.max_concurrent,
                    "Bulkhead rejected call"
                );
                return Err(SpeakerError::BulkheadFull(self.max_concurrent));
            }
        };
        operation.await
    }
}
