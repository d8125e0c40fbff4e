//! JSONファイルからのスピーカー初期データ取り込み

use super::traits::SpeakerStore;
use crate::common::error::{CommonError, SpeakerError, SpeakerResult};
use crate::types::Speaker;
use std::path::Path;

/// JSON配列ファイルからスピーカーを取り込む
///
/// ファイルが存在しない場合はスキップする。既に存在するIDのスピーカーは登録しない。
///
/// # Returns
/// * `Ok(n)` - 新規に登録した件数
pub async fn import_speakers_from_json(
    store: &dyn SpeakerStore,
    json_path: &Path,
) -> SpeakerResult<usize> {
    if !json_path.exists() {
        tracing::info!(
            "No speaker seed file found at {}, skipping import",
            json_path.display()
        );
        return Ok(0);
    }

    let content = tokio::fs::read_to_string(json_path).await.map_err(|e| {
        SpeakerError::Internal(format!(
            "Failed to read seed file {}: {}",
            json_path.display(),
            e
        ))
    })?;
    let speakers: Vec<Speaker> = serde_json::from_str(&content).map_err(CommonError::from)?;

    let mut imported = 0;
    for speaker in &speakers {
        if let Some(id) = speaker.id.as_deref().map(str::trim) {
            if store.get_by_id(id).await?.is_some() {
                tracing::debug!(speaker_id = id, "Seed speaker already present, skipping");
                continue;
            }
        }
        store.insert(speaker).await?;
        imported += 1;
    }

    tracing::info!(
        imported,
        total = speakers.len(),
        "Imported speakers from {}",
        json_path.display()
    );
    Ok(imported)
}
