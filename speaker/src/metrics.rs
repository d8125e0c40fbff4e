//! メトリクス収集
//!
//! エンドポイントごとの呼び出し回数と一覧取得の処理時間を
//! Prometheus形式で公開する。

use crate::common::error::{SpeakerError, SpeakerResult};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// スピーカーサービスのメトリクス
#[derive(Clone)]
pub struct SpeakerMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    list_duration: Histogram,
    health_status_updates: IntCounter,
}

impl SpeakerMetrics {
    /// 専用レジストリにメトリクスを登録して作成
    pub fn new() -> SpeakerResult<Self> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("speaker_requests_total", "Number of calls per speaker operation"),
            &["operation"],
        )
        .map_err(metrics_error)?;
        let list_duration = Histogram::with_opts(HistogramOpts::new(
            "speaker_list_duration_seconds",
            "Time spent listing all speakers",
        ))
        .map_err(metrics_error)?;
        let health_status_updates = IntCounter::new(
            "speaker_health_status_updates_total",
            "Number of health status updates",
        )
        .map_err(metrics_error)?;

        registry
            .register(Box::new(requests_total.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(list_duration.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(health_status_updates.clone()))
            .map_err(metrics_error)?;

        Ok(Self {
            registry,
            requests_total,
            list_duration,
            health_status_updates,
        })
    }

    /// 操作の呼び出しを1件記録
    pub fn record_call(&self, operation: &str) {
        self.requests_total.with_label_values(&[operation]).inc();
    }

    /// 操作の累計呼び出し回数
    pub fn call_count(&self, operation: &str) -> u64 {
        self.requests_total.with_label_values(&[operation]).get()
    }

    /// 一覧取得の処理時間タイマーを開始（Dropで記録）
    pub fn start_list_timer(&self) -> prometheus::HistogramTimer {
        self.list_duration.start_timer()
    }

    /// ヘルス状態更新を記録
    pub fn record_health_status_update(&self) {
        self.health_status_updates.inc();
    }

    /// テキスト形式でエンコード
    pub fn encode(&self) -> SpeakerResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metrics_error)?;
        String::from_utf8(buffer).map_err(|e| SpeakerError::Internal(e.to_string()))
    }
}

fn metrics_error(err: prometheus::Error) -> SpeakerError {
    SpeakerError::Internal(format!("Metrics error: {}", err))
}
