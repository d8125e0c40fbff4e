//! Repository traitパターン定義
//!
//! ハンドラーはストアを `Arc<dyn SpeakerStore>` として受け取り、
//! 具体的な永続化方式に依存しない。

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::error::SpeakerResult;
use crate::types::Speaker;

/// スピーカーCRUD・検索のRepository trait
#[async_trait]
pub trait SpeakerStore: Send + Sync {
    /// 全スピーカーを取得
    async fn list(&self) -> SpeakerResult<Vec<Speaker>>;
    /// IDでスピーカーを取得
    async fn get_by_id(&self, id: &str) -> SpeakerResult<Option<Speaker>>;
    /// スピーカーを登録（IDが未指定なら採番）
    async fn insert(&self, speaker: &Speaker) -> SpeakerResult<Speaker>;
    /// スピーカーを全置換で更新
    async fn update(&self, speaker: &Speaker) -> SpeakerResult<Speaker>;
    /// スピーカーを削除（存在しなければ何もしない）
    async fn delete_by_id(&self, id: &str) -> SpeakerResult<()>;
    /// テンプレートに一致するスピーカーの集合を取得（ID重複なし）
    async fn find(&self, template: &Speaker) -> SpeakerResult<Vec<Speaker>>;
}

#[async_trait]
impl SpeakerStore for SqlitePool {
    async fn list(&self) -> SpeakerResult<Vec<Speaker>> {
        super::speakers::list_speakers(self).await
    }

    async fn get_by_id(&self, id: &str) -> SpeakerResult<Option<Speaker>> {
        super::speakers::get_speaker(self, id).await
    }

    async fn insert(&self, speaker: &Speaker) -> SpeakerResult<Speaker> {
        super::speakers::insert_speaker(self, speaker).await
    }

    async fn update(&self, speaker: &Speaker) -> SpeakerResult<Speaker> {
        super::speakers::update_speaker(self, speaker).await
    }

    async fn delete_by_id(&self, id: &str) -> SpeakerResult<()> {
        let deleted = super::speakers::delete_speaker(self, id).await?;
        if !deleted {
            tracing::debug!(speaker_id = id, "Delete requested for unknown speaker");
        }
        Ok(())
    }

    async fn find(&self, template: &Speaker) -> SpeakerResult<Vec<Speaker>> {
        super::speakers::find_speakers(self, template).await
    }
}
