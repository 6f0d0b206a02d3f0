//! エラー型

use thiserror::Error;

/// ホストブリッジ呼び出しのエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("ホストブリッジが利用できません: {0}")]
    Unavailable(String),
    #[error("{method} の呼び出しに失敗しました: {message}")]
    Call { method: &'static str, message: String },
    #[error("{method} の応答を解析できません: {message}")]
    Decode { method: &'static str, message: String },
}

/// ワークスペースビューアのエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkspaceError {
    #[error("このプロジェクトには作業フォルダが設定されていません。プロジェクト設定で作業フォルダを指定してください。")]
    MissingBaseFolder,
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}
