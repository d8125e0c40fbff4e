//! アプリケーションのヘルス状態
//!
//! `POST /updateHealthStatus` で切り替えられるプロセス全体のフラグ。
//! 複数リクエストからの同時更新は最後の書き込みが勝つ。

use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// ヘルスチェック結果
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// 稼働中
    Up,
    /// 停止扱い
    Down,
}

/// プロセス全体で共有するヘルス状態
#[derive(Clone, Debug, Default)]
pub struct HealthState {
    inner: Arc<AtomicBool>,
}

impl HealthState {
    /// 「停止中」フラグを設定する
    pub fn set_down(&self, is_app_down: bool) {
        self.inner.store(is_app_down, Ordering::SeqCst);
        tracing::info!(is_app_down, "Application health status updated");
    }

    /// 停止中ならtrue
    pub fn is_down(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// 現在のヘルス状態
    pub fn status(&self) -> HealthStatus {
        if self.is_down() {
            HealthStatus::Down
        } else {
            HealthStatus::Up
        }
    }
}
