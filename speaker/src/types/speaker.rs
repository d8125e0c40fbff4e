//! スピーカー型定義

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ハイパーメディアリンク（relation名 → 絶対URI）
pub type Links = BTreeMap<String, String>;

/// スピーカー
///
/// `links` はレスポンス生成時にのみ付与される表示用メタデータで、
/// 永続化されず、リクエストボディからも読み込まない。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    /// スピーカーID（未永続化の場合はNone）
    #[serde(default)]
    pub id: Option<String>,
    /// 氏名
    #[serde(default)]
    pub name: Option<String>,
    /// 所属組織
    #[serde(default)]
    pub organization: Option<String>,
    /// 経歴
    #[serde(default)]
    pub biography: Option<String>,
    /// プロフィール画像URL
    #[serde(default)]
    pub picture: Option<String>,
    /// Twitterハンドル
    #[serde(default)]
    pub twitter_handle: Option<String>,
    /// ハイパーメディアリンク
    #[serde(default, skip_deserializing)]
    pub links: Links,
}

impl Speaker {
    /// IDなしの空スピーカー（未検出時のセンチネル）
    pub fn empty() -> Self {
        Self::default()
    }
}
