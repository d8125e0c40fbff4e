//! serve サブコマンド
//!
//! スピーカーサーバーを起動します。

use crate::config::{get_env_with_fallback, SpeakerConfig};
use clap::Args;
use std::path::PathBuf;

/// serve サブコマンドの引数
///
/// 指定されたオプションは設定ファイル・`SPEAKER__*` 環境変数より優先する。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, env = "SPEAKER_PORT")]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long, env = "SPEAKER_HOST")]
    pub host: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, env = "SPEAKER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ServeArgs {
    /// サブコマンド省略時に環境変数から引数を組み立てる
    pub fn from_env() -> Self {
        Self {
            port: get_env_with_fallback("SPEAKER_PORT", "PORT").and_then(|v| v.parse().ok()),
            host: get_env_with_fallback("SPEAKER_HOST", "HOST"),
            config: std::env::var_os("SPEAKER_CONFIG").map(PathBuf::from),
        }
    }

    /// コマンドライン指定で設定を上書きする
    pub fn apply(&self, config: &mut SpeakerConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
    }
}
