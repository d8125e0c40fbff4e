//! データベースアクセス層
//!
//! SQLiteベースのスピーカー永続化

/// データベース初期化・マイグレーション
pub mod migrations;

/// 初期データ取り込み
pub mod seed;

/// スピーカー操作
pub mod speakers;

/// Repository traitパターン
pub mod traits;

pub use migrations::initialize_database;
pub use traits::SpeakerStore;
