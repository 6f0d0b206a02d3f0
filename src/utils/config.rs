//! 設定値
//!
//! ビルド時に埋め込まれる値と固定の定数をまとめる

/// ホストブリッジのグローバル名（既定値）
pub const DEFAULT_HOST_BRIDGE_GLOBAL: &str = "hostBridge";

/// ファイルツリーの最大階層
pub const MAX_TREE_DEPTH: usize = 5;

/// 展開しない依存キャッシュディレクトリ
pub const SKIPPED_DIR_NAMES: &[&str] = &["node_modules"];

/// 隠しファイルの接頭辞
pub const HIDDEN_PREFIX: char = '.';

/// トレイ折りたたみ状態の保存キー（プロジェクト非依存）
pub const TRAY_COLLAPSED_KEY: &str = "operator_tray_collapsed";

/// ドラッグ転送で使う独自メディアタイプ
pub const OPERATOR_DRAG_MIME: &str = "application/x-operator-card";

/// 画像としてプレビューする拡張子
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// ホストブリッジのグローバル名を取得（HOST_BRIDGE_GLOBAL、ビルド時に埋め込み）
pub fn host_bridge_global() -> &'static str {
    option_env!("HOST_BRIDGE_GLOBAL").unwrap_or(DEFAULT_HOST_BRIDGE_GLOBAL)
}

/// ファイルツリー構築オプション
#[derive(Debug, Clone, PartialEq)]
pub struct TreeOptions {
    pub max_depth: usize,
    pub skipped_dir_names: Vec<String>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_TREE_DEPTH,
            skipped_dir_names: SKIPPED_DIR_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TreeOptions {
    /// このディレクトリを再帰的に展開するか
    pub fn should_expand(&self, name: &str) -> bool {
        !name.starts_with(HIDDEN_PREFIX) && !self.skipped_dir_names.iter().any(|n| n == name)
    }
}
