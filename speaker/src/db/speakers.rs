//! スピーカーデータベース操作

use crate::common::error::{CommonError, SpeakerError, SpeakerResult};
use crate::types::Speaker;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// スピーカー一覧を取得（登録順）
pub async fn list_speakers(pool: &SqlitePool) -> SpeakerResult<Vec<Speaker>> {
    let rows = sqlx::query_as::<_, SpeakerRow>(
        r#"
        SELECT id, name, organization, biography, picture, twitter_handle
        FROM speakers
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// IDでスピーカーを取得
pub async fn get_speaker(pool: &SqlitePool, id: &str) -> SpeakerResult<Option<Speaker>> {
    let row = sqlx::query_as::<_, SpeakerRow>(
        r#"
        SELECT id, name, organization, biography, picture, twitter_handle
        FROM speakers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

/// スピーカーを登録
///
/// IDが未指定ならUUIDを採番する。指定IDが既に存在する場合は `Conflict`。
pub async fn insert_speaker(pool: &SqlitePool, speaker: &Speaker) -> SpeakerResult<Speaker> {
    let id = normalize_id(speaker.id.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let created_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO speakers (id, name, organization, biography, picture, twitter_handle, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&speaker.name)
    .bind(&speaker.organization)
    .bind(&speaker.biography)
    .bind(&speaker.picture)
    .bind(&speaker.twitter_handle)
    .bind(&created_at)
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            SpeakerError::Conflict(format!("Speaker already exists: {}", id))
        }
        other => other.into(),
    })?;

    Ok(Speaker {
        id: Some(id),
        links: Default::default(),
        ..speaker.clone()
    })
}

/// スピーカーを全置換で更新
///
/// IDが未指定なら検証エラー、存在しなければ `NotFound`。
pub async fn update_speaker(pool: &SqlitePool, speaker: &Speaker) -> SpeakerResult<Speaker> {
    let id = normalize_id(speaker.id.as_deref()).ok_or_else(|| {
        SpeakerError::Common(CommonError::Validation(
            "Speaker id is required for update".to_string(),
        ))
    })?;

    let result = sqlx::query(
        r#"
        UPDATE speakers
        SET name = ?, organization = ?, biography = ?, picture = ?, twitter_handle = ?
        WHERE id = ?
        "#,
    )
    .bind(&speaker.name)
    .bind(&speaker.organization)
    .bind(&speaker.biography)
    .bind(&speaker.picture)
    .bind(&speaker.twitter_handle)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SpeakerError::NotFound(format!("Speaker {}", id)));
    }

    Ok(Speaker {
        id: Some(id.to_string()),
        links: Default::default(),
        ..speaker.clone()
    })
}

/// スピーカーを削除（存在しなければ何もしない）
///
/// 削除した場合はtrueを返す。
pub async fn delete_speaker(pool: &SqlitePool, id: &str) -> SpeakerResult<bool> {
    let result = sqlx::query("DELETE FROM speakers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// テンプレートに一致するスピーカーを検索
///
/// 値が設定されたフィールドはすべて大文字小文字を無視した部分一致、IDは完全一致。
/// IDは主キーのため結果に重複はない。
pub async fn find_speakers(
    pool: &SqlitePool,
    template: &Speaker,
) -> SpeakerResult<Vec<Speaker>> {
    fn criterion(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase)
    }

    let rows = sqlx::query_as::<_, SpeakerRow>(
        r#"
        SELECT id, name, organization, biography, picture, twitter_handle
        FROM speakers
        WHERE (?1 IS NULL OR id = ?1)
          AND (?2 IS NULL OR instr(lower(coalesce(name, '')), ?2) > 0)
          AND (?3 IS NULL OR instr(lower(coalesce(organization, '')), ?3) > 0)
          AND (?4 IS NULL OR instr(lower(coalesce(biography, '')), ?4) > 0)
          AND (?5 IS NULL OR instr(lower(coalesce(picture, '')), ?5) > 0)
          AND (?6 IS NULL OR instr(lower(coalesce(twitter_handle, '')), ?6) > 0)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(normalize_id(template.id.as_deref()))
    .bind(criterion(&template.name))
    .bind(criterion(&template.organization))
    .bind(criterion(&template.biography))
    .bind(criterion(&template.picture))
    .bind(criterion(&template.twitter_handle))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// 前後の空白を除いたID（空ならNone）
///
/// 登録・更新・検索で同じ正規化を使う。
fn normalize_id(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct SpeakerRow {
    id: String,
    name: Option<String>,
    organization: Option<String>,
    biography: Option<String>,
    picture: Option<String>,
    twitter_handle: Option<String>,
}

impl From<SpeakerRow> for Speaker {
    fn from(row: SpeakerRow) -> Self {
        Speaker {
            id: Some(row.id),
            name: row.name,
            organization: row.organization,
            biography: row.biography,
            picture: row.picture,
            twitter_handle: row.twitter_handle,
            links: Default::default(),
        }
    }
}
