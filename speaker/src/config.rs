//! Configuration management
//!
//! `SpeakerConfig` is loaded from an optional TOML file and `SPEAKER__*`
//! environment overrides. Per-request flags are read through the env helper
//! functions, which fall back to deprecated variable names with a warning.

use crate::common::error::CommonResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use speaker::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("SPEAKER_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 検索サービスの故障注入フラグ
///
/// 環境変数 `SPEAKER_BREAKING_SERVICE_BROKEN`（旧: `BREAKING_SERVICE_BROKEN`）が
/// `true/1/yes/on` のときに有効。呼び出しごとに読み直すため、実行中に切り替えられる。
pub fn is_service_broken() -> bool {
    get_env_with_fallback("SPEAKER_BREAKING_SERVICE_BROKEN", "BREAKING_SERVICE_BROKEN")
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

/// サーキットブレーカー設定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// 判定に使うローリングウィンドウの呼び出し数 (デフォルト: 2)
    #[serde(default = "default_request_volume_threshold")]
    pub request_volume_threshold: usize,

    /// オープンに遷移する失敗率 (デフォルト: 0.5)
    #[serde(default = "default_failure_ratio")]
    pub failure_ratio: f64,

    /// オープン状態を維持する時間（ミリ秒）(デフォルト: 5000)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// ハーフオープンからクローズに戻るのに必要な連続成功数 (デフォルト: 2)
    #[serde(default = "default_success_threshold")]
    pub success_threshold: usize,
}

fn default_request_volume_threshold() -> usize {
    2
}

fn default_failure_ratio() -> f64 {
    0.5
}

fn default_delay_ms() -> u64 {
    5000
}

fn default_success_threshold() -> usize {
    2
}

impl CircuitBreakerConfig {
    /// オープン状態の維持時間
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            request_volume_threshold: default_request_volume_threshold(),
            failure_ratio: default_failure_ratio(),
            delay_ms: default_delay_ms(),
            success_threshold: default_success_threshold(),
        }
    }
}

/// speaker service設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 9080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// データベースURL (デフォルト: "sqlite://speaker.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// リンク生成に使う公開URL（未設定ならリクエストのHostから組み立てる）
    #[serde(default)]
    pub public_url: Option<String>,

    /// 起動時に取り込むスピーカーJSONファイル
    #[serde(default)]
    pub seed_file: Option<String>,

    /// 一覧取得の同時実行上限 (デフォルト: 3)
    #[serde(default = "default_bulkhead_max_concurrent")]
    pub bulkhead_max_concurrent: usize,

    /// 検索のサーキットブレーカー設定
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9080
}

fn default_database_url() -> String {
    "sqlite://speaker.db".to_string()
}

fn default_bulkhead_max_concurrent() -> usize {
    3
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            public_url: None,
            seed_file: None,
            bulkhead_max_concurrent: default_bulkhead_max_concurrent(),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

impl SpeakerConfig {
    /// 設定ファイル（任意）と環境変数 `SPEAKER__*` から設定を読み込む
    ///
    /// 例: `SPEAKER__PORT=8080`, `SPEAKER__CIRCUIT_BREAKER__DELAY_MS=1000`
    pub fn load(path: Option<&Path>) -> CommonResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("SPEAKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
