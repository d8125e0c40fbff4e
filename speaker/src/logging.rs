//! ロギング初期化ユーティリティ
//!
//! 標準エラー出力へのログに加え、`SPEAKER_LOG_DIR` が設定されていれば
//! 日次ローテーションのファイルにも書き出す。

use crate::common::error::{CommonError, CommonResult};
use crate::config::{get_env_with_fallback, get_env_with_fallback_or};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "speaker.log";

/// ファイル出力のワーカーを保持するガード
///
/// ドロップされるとバッファ済みのログをフラッシュして書き込みを終える。
/// プロセス終了まで保持すること。
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// tracingサブスクライバーを初期化
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ
/// `SPEAKER_LOG_LEVEL`（旧: `LOG_LEVEL`、デフォルト: info）を使う。
pub fn init() -> CommonResult<LogGuard> {
    let filter = build_filter()?;
    let log_dir = get_env_with_fallback("SPEAKER_LOG_DIR", "LOG_DIR");

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));

    let guard = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                CommonError::Config(format!("Failed to create log directory {}: {}", dir, e))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| CommonError::Config(format!("Failed to initialize logging: {}", e)))?;
            Some(guard)
        }
        None => {
            registry
                .try_init()
                .map_err(|e| CommonError::Config(format!("Failed to initialize logging: {}", e)))?;
            None
        }
    };

    Ok(LogGuard { _file: guard })
}

fn build_filter() -> CommonResult<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::try_from_default_env()
            .map_err(|e| CommonError::Config(format!("Invalid RUST_LOG: {}", e)));
    }
    let level = get_env_with_fallback_or("SPEAKER_LOG_LEVEL", "LOG_LEVEL", "info");
    EnvFilter::try_new(&level)
        .map_err(|e| CommonError::Config(format!("Invalid log level '{}': {}", level, e)))
}
