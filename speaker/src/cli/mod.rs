//! speaker CLI
//!
//! サーバー起動用のコマンドラインインターフェース

pub mod serve;

use clap::{Parser, Subcommand};

/// Speaker service - REST API for conference speakers
#[derive(Parser, Debug)]
#[command(name = "speaker")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SPEAKER_HOST                      Bind address (default: 0.0.0.0)
    SPEAKER_PORT                      Listen port (default: 9080)
    SPEAKER_CONFIG                    Path to a TOML config file
    SPEAKER_LOG_LEVEL                 Log level (default: info)
    SPEAKER_LOG_DIR                   Directory for daily rotated log files
    SPEAKER__DATABASE_URL             Database URL (default: sqlite://speaker.db)
    SPEAKER__PUBLIC_URL               Base URL used for hypermedia links
    SPEAKER__SEED_FILE                JSON file with speakers imported at startup
    SPEAKER_BREAKING_SERVICE_BROKEN   Make /search fail (fault injection)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the speaker server
    Serve(serve::ServeArgs),
}
