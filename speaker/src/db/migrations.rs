//! データベース初期化とマイグレーション

use crate::common::error::{SpeakerError, SpeakerResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// SQLite接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite://data/speaker.db", "sqlite::memory:"）
pub async fn initialize_database(database_url: &str) -> SpeakerResult<SqlitePool> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// SQLite接続プールを作成する
///
/// ファイルDBは親ディレクトリとファイルを必要に応じて作成する。
/// インメモリDBは接続ごとに別DBになるため、単一接続を保持し続ける。
pub async fn create_pool(database_url: &str) -> SpeakerResult<SqlitePool> {
    let in_memory = is_in_memory(database_url);

    if !in_memory {
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            if let Some(parent) = std::path::Path::new(path_without_params).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        SpeakerError::Database(format!(
                            "Failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| SpeakerError::Database(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true);

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    pool_options
        .connect_with(connect_options)
        .await
        .map_err(|e| SpeakerError::Database(format!("Failed to connect to database: {}", e)))
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
pub async fn run_migrations(pool: &SqlitePool) -> SpeakerResult<()> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| SpeakerError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
