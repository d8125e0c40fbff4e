//! ハイパーメディアリンク生成
//!
//! リクエストに依存しない純粋関数として、ベースURIとスピーカーIDから
//! relation名 → 絶対URIのマップを組み立てる。

use crate::types::{Links, Speaker};
use axum::http::{header, HeaderMap};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// パスセグメント内でエスケープが必要な文字
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// 個別スピーカーの取得
pub const REL_SELF: &str = "self";
/// 個別スピーカーの削除
pub const REL_REMOVE: &str = "remove";
/// スピーカーの更新
pub const REL_UPDATE: &str = "update";
/// スピーカーの追加
pub const REL_ADD: &str = "add";
/// スピーカーの検索
pub const REL_SEARCH: &str = "search";

/// ベースURIとIDからリンクマップを生成する
///
/// IDがある場合は `self`/`remove`/`update` を含め、
/// コレクション操作の `add`/`search` は常に含める。
pub fn hypermedia_links(base_uri: &str, id: Option<&str>) -> Links {
    let base = base_uri.trim_end_matches('/');
    let mut links = Links::new();

    if let Some(id) = id {
        // IDは単一のパスセグメントとしてエンコードする
        let segment = utf8_percent_encode(id, PATH_SEGMENT);
        links.insert(REL_SELF.to_string(), format!("{}/retrieve/{}", base, segment));
        links.insert(REL_REMOVE.to_string(), format!("{}/remove/{}", base, segment));
        links.insert(REL_UPDATE.to_string(), format!("{}/update", base));
    }

    links.insert(REL_ADD.to_string(), format!("{}/add", base));
    links.insert(REL_SEARCH.to_string(), format!("{}/search", base));
    links
}

/// スピーカーにリンクを付与して返す
///
/// 既存のリンクは破棄して作り直す。
pub fn add_hypermedia(base_uri: &str, mut speaker: Speaker) -> Speaker {
    speaker.links = hypermedia_links(base_uri, speaker.id.as_deref());
    speaker
}

/// リクエストヘッダーからベースURIを組み立てる
///
/// `public_url` が設定されていればそれを優先する。次に `X-Forwarded-Proto` /
/// `X-Forwarded-Host` / `Host` を使い、いずれもなければ `fallback` を返す。
pub fn base_uri_from_headers(
    headers: &HeaderMap,
    public_url: Option<&str>,
    fallback: &str,
) -> String {
    if let Some(url) = public_url {
        return url.trim_end_matches('/').to_string();
    }

    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let host = header_str("x-forwarded-host").or_else(|| header_str(header::HOST.as_str()));
    match host {
        Some(host) => {
            let scheme = header_str("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
            format!("{}://{}", scheme, host)
        }
        None => fallback.trim_end_matches('/').to_string(),
    }
}
