//! 型定義モジュール
//!
//! ドメインエンティティの型定義を提供

/// スピーカー関連の型定義
pub mod speaker;

pub use speaker::{Links, Speaker};
