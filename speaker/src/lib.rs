//! Speaker service
//!
//! カンファレンス登壇者（スピーカー）を管理するREST APIサーバー。
//! 一覧取得はバルクヘッド、検索はサーキットブレーカーで保護する。

#![warn(missing_docs)]

/// 共通エラー型
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 設定管理（設定ファイル・環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// アプリケーションのヘルス状態
pub mod health;

/// ハイパーメディアリンク生成
pub mod links;

/// ロギング初期化ユーティリティ
pub mod logging;

/// メトリクス収集
pub mod metrics;

/// サーキットブレーカー・バルクヘッド・フォールバック
pub mod resilience;

/// HTTPサーバー起動
pub mod server;

/// 協調的シャットダウン
pub mod shutdown;

/// CLIインターフェース
pub mod cli;

/// 型定義
pub mod types;

use crate::common::error::SpeakerResult;
use crate::config::SpeakerConfig;
use crate::db::SpeakerStore;
use crate::health::HealthState;
use crate::metrics::SpeakerMetrics;
use crate::resilience::{Bulkhead, CircuitBreaker};
use crate::shutdown::ShutdownController;
use std::sync::Arc;

/// アプリケーション状態
///
/// 各ハンドラーで共有する。クローンは同じ内部状態を参照する。
#[derive(Clone)]
pub struct AppState {
    /// スピーカーの永続化ストア
    pub store: Arc<dyn SpeakerStore>,
    /// ヘルス状態
    pub health: HealthState,
    /// メトリクス
    pub metrics: SpeakerMetrics,
    /// 検索用サーキットブレーカー
    pub search_breaker: CircuitBreaker,
    /// 一覧取得用バルクヘッド
    pub list_bulkhead: Bulkhead,
    /// 設定
    pub config: Arc<SpeakerConfig>,
    /// シャットダウン制御
    pub shutdown: ShutdownController,
}

impl AppState {
    /// ストアと設定からアプリケーション状態を構築
    pub fn new(store: Arc<dyn SpeakerStore>, config: SpeakerConfig) -> SpeakerResult<Self> {
        Ok(Self {
            store,
            health: HealthState::default(),
            metrics: SpeakerMetrics::new()?,
            search_breaker: CircuitBreaker::new("search", config.circuit_breaker),
            list_bulkhead: Bulkhead::new("retrieveAll", config.bulkhead_max_concurrent),
            config: Arc::new(config),
            shutdown: ShutdownController::default(),
        })
    }
}
