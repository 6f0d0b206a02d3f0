//! ユーティリティモジュール

pub mod config;
pub mod file_loader;
pub mod file_tree;
pub mod host;
pub mod log_trace;
pub mod prefs;
pub mod request_seq;

#[cfg(test)]
pub mod fake_host;

use base64::Engine;

use crate::models::Project;

// 共通ヘルパー

/// Base64デコード
pub fn decode_base64(data: &str) -> Option<String> {
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}

/// data URIを構築
pub fn data_uri(media_type: &str, base64_body: &str) -> String {
    format!("data:{};base64,{}", media_type, base64_body.trim())
}

const PROJECT_HASH_PREFIX: &str = "#project=";

/// URLハッシュ（#project=<base64 JSON>）からプロジェクトを取得
pub fn decode_project_hash(hash: &str) -> Option<Project> {
    let encoded = hash.strip_prefix(PROJECT_HASH_PREFIX)?;
    let json = decode_base64(encoded)?;
    serde_json::from_str(&json).ok()
}
