//! 協調的シャットダウン制御
//!
//! `server.rs` がOSシグナルと組み合わせてグレースフルシャットダウンを行う。

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Notify;

/// プロセス内からシャットダウンを要求するためのハンドル
///
/// テストや組み込み利用時に、シグナルを送らずにサーバーを停止させる。
#[derive(Clone, Debug, Default)]
pub struct ShutdownController {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl ShutdownController {
    /// シャットダウンが要求済みならtrue
    pub fn is_shutdown_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// シャットダウンを要求し、待機中のタスクをすべて起こす
    pub fn request_shutdown(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// シャットダウンが要求されるまで待機
    pub async fn wait(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        // 要求フラグ確認前に登録しておき、確認直後の通知を取りこぼさない
        notified.as_mut().enable();
        if self.is_shutdown_requested() {
            return;
        }
        notified.await;
    }
}
