//! データ構造体モジュール

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, WorkspaceError};
use crate::utils::config::IMAGE_EXTENSIONS;

// ============================================
// オペレーター
// ============================================

/// オペレーター（ホストから取得、UIからは読み取り専用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// ドラッグ転送用の最小限の記述子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorDragPayload {
    pub id: i64,
    pub name: String,
    pub avatar: String,
    pub role: String,
    pub color: String,
}

impl From<&Operator> for OperatorDragPayload {
    fn from(op: &Operator) -> Self {
        Self {
            id: op.id,
            name: op.name.clone(),
            avatar: op.avatar.clone(),
            role: op.role.clone(),
            color: op.color.clone(),
        }
    }
}

impl OperatorDragPayload {
    /// 転送データ用のJSON文字列
    pub fn to_transfer_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// ドロップ側での復元
    #[allow(dead_code)]
    pub fn from_transfer_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}

/// アバターの表示種別
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarKind {
    Image(String),
    Glyph(String),
}

impl Operator {
    /// アバター文字列が画像参照か絵文字/記号かを判定
    pub fn avatar_kind(&self) -> AvatarKind {
        let avatar = self.avatar.trim();
        if avatar.is_empty() {
            let initial = self
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect::<String>())
                .unwrap_or_else(|| "?".to_string());
            return AvatarKind::Glyph(initial);
        }
        let is_image = ["http://", "https://", "data:", "file:", "/", "./"]
            .iter()
            .any(|prefix| avatar.starts_with(prefix));
        if is_image {
            AvatarKind::Image(avatar.to_string())
        } else {
            AvatarKind::Glyph(avatar.to_string())
        }
    }
}

// ============================================
// プロジェクト
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_folder: Option<String>,
}

impl Project {
    /// 空文字は未設定として扱う
    pub fn base_folder(&self) -> Option<&str> {
        self.base_folder
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

// ============================================
// ファイルシステム
// ============================================

/// fs.readDir の1エントリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub is_directory: bool,
}

/// fs.stat の結果（存在確認のみに使用）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub is_directory: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// 差分表示用（このビューアでは未設定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Created,
    Modified,
}

/// ファイルツリーのノード
///
/// ファイルは常に `children == None`。
/// フォルダは読み込み済みなら `Some`（空もあり）、展開対象外なら `None`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Option<Vec<FileTreeNode>>,
    #[serde(default)]
    pub status: Option<NodeStatus>,
}

impl FileTreeNode {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            children: None,
            status: None,
        }
    }

    pub fn folder(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Option<Vec<FileTreeNode>>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Folder,
            children,
            status: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// 配下のファイル数（自身がファイルなら1）
    pub fn file_count(&self) -> usize {
        if !self.is_folder() {
            return 1;
        }
        self.children
            .as_ref()
            .map(|children| children.iter().map(FileTreeNode::file_count).sum())
            .unwrap_or(0)
    }
}

// ============================================
// ファイルタイプ
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Text,
}

/// 読み込んだファイル内容
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    Image { data_uri: String },
    Text { text: String, language: &'static str },
}

impl FileContent {
    pub fn is_image(&self) -> bool {
        matches!(self, FileContent::Image { .. })
    }
}

/// パス末尾のファイル名
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// 小文字化した拡張子（なければNone）
pub fn file_extension(path: &str) -> Option<String> {
    let name = file_name(path);
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// 拡張子で画像/テキストを判定（不明な拡張子はテキスト）
pub fn detect_content_kind(path: &str) -> ContentKind {
    match file_extension(path) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => ContentKind::Image,
        _ => ContentKind::Text,
    }
}

/// 画像のメディアタイプ（svgのみ svg+xml）
pub fn image_media_type(ext: &str) -> String {
    match ext {
        "svg" => "image/svg+xml".to_string(),
        other => format!("image/{}", other),
    }
}

/// 拡張子から表示言語タグを決定（全入力で定義済み、不明は "text"）
pub fn language_for_path(path: &str) -> &'static str {
    match file_name(path).to_lowercase().as_str() {
        "dockerfile" => return "dockerfile",
        "makefile" => return "makefile",
        _ => {}
    }

    let Some(ext) = file_extension(path) else {
        return "text";
    };
    match ext.as_str() {
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" | "mts" | "cts" | "tsx" => "typescript",
        "json" => "json",
        "md" | "markdown" => "markdown",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "less" => "less",
        "py" => "python",
        "rs" => "rust",
        "go" => "go",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "sh" | "bash" | "zsh" => "shell",
        "ps1" => "powershell",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "xml" | "svg" => "xml",
        "sql" => "sql",
        "vue" => "vue",
        "ini" | "cfg" | "conf" => "ini",
        _ => "text",
    }
}

// ============================================
// 表示モード
// ============================================

/// オペレータートレイの表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMode {
    Loading,
    Empty,
    Populated,
}

impl TrayMode {
    pub fn select(loading: bool, count: usize) -> Self {
        if loading {
            TrayMode::Loading
        } else if count == 0 {
            TrayMode::Empty
        } else {
            TrayMode::Populated
        }
    }
}

/// サイドバー（ファイルツリー）の表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarMode {
    Spinner,
    Error,
    Tree,
    NoFiles,
}

impl SidebarMode {
    pub fn select(is_loading: bool, has_error: bool, count: usize) -> Self {
        if is_loading {
            SidebarMode::Spinner
        } else if has_error {
            SidebarMode::Error
        } else if count > 0 {
            SidebarMode::Tree
        } else {
            SidebarMode::NoFiles
        }
    }
}

/// メインペインの表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneMode {
    NothingSelected,
    ImagePreview,
    TextViewer,
}

impl PaneMode {
    pub fn select(selected: bool, is_image: bool) -> Self {
        match (selected, is_image) {
            (false, _) => PaneMode::NothingSelected,
            (true, true) => PaneMode::ImagePreview,
            (true, false) => PaneMode::TextViewer,
        }
    }
}

// ============================================
// UI状態
// ============================================

/// オペレーター一覧の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorListState {
    pub operators: Vec<Operator>,
    pub loading: bool,
}

impl OperatorListState {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// 失敗時は直前の一覧を保持する
    pub fn apply(&mut self, result: Result<Vec<Operator>, BridgeError>) {
        if let Ok(operators) = result {
            self.operators = operators;
        }
        self.loading = false;
    }

    pub fn mode(&self) -> TrayMode {
        TrayMode::select(self.loading, self.operators.len())
    }
}

/// ファイルツリーの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeState {
    pub nodes: Vec<FileTreeNode>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TreeState {
    /// 再構築のたびに全体を作り直す
    pub fn begin(&mut self) {
        *self = Self {
            nodes: Vec::new(),
            loading: true,
            error: None,
        };
    }

    pub fn apply(&mut self, result: Result<Vec<FileTreeNode>, WorkspaceError>) {
        self.loading = false;
        match result {
            Ok(nodes) => {
                self.nodes = nodes;
                self.error = None;
            }
            Err(e) => {
                self.nodes = Vec::new();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn mode(&self) -> SidebarMode {
        SidebarMode::select(self.loading, self.error.is_some(), self.nodes.len())
    }
}

/// 選択中ファイルの表示状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileViewState {
    pub selected_path: Option<String>,
    pub content: Option<FileContent>,
    pub error: Option<String>,
    pub loading: bool,
}

impl FileViewState {
    /// 前回の内容を消してから読み込みを開始
    pub fn begin(&mut self, path: &str) {
        *self = Self {
            selected_path: Some(path.to_string()),
            content: None,
            error: None,
            loading: true,
        };
    }

    /// 失敗時はパス表示を残し、内容は空のまま
    pub fn apply(&mut self, result: Result<FileContent, WorkspaceError>) {
        self.loading = false;
        match result {
            Ok(content) => self.content = Some(content),
            Err(e) => {
                self.content = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_image(&self) -> bool {
        self.content.as_ref().map(FileContent::is_image).unwrap_or(false)
    }

    pub fn mode(&self) -> PaneMode {
        PaneMode::select(self.selected_path.is_some(), self.is_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Operator {
        Operator {
            id: 7,
            name: "Ada".to_string(),
            role: "Reviewer".to_string(),
            avatar: "🧠".to_string(),
            color: "#fff".to_string(),
            description: Some("long description".to_string()),
            system_prompt: Some("a very long prompt".to_string()),
            model: Some("model-x".to_string()),
        }
    }

    #[test]
    fn drag_payload_contains_exactly_five_fields() {
        let json = OperatorDragPayload::from(&ada()).to_transfer_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "name": "Ada",
                "avatar": "🧠",
                "role": "Reviewer",
                "color": "#fff"
            })
        );
    }

    #[test]
    fn drag_payload_is_readable_by_drop_targets() {
        let json = OperatorDragPayload::from(&ada()).to_transfer_json().unwrap();
        let payload = OperatorDragPayload::from_transfer_json(&json).unwrap();
        assert_eq!(payload.id, 7);
        assert!(OperatorDragPayload::from_transfer_json("not json").is_none());
    }

    #[test]
    fn operator_decodes_with_missing_optional_fields() {
        let op: Operator = serde_json::from_str(r#"{"id":1,"name":"Bo"}"#).unwrap();
        assert_eq!(op.role, "");
        assert!(op.system_prompt.is_none());
    }

    #[test]
    fn avatar_kind_distinguishes_images_from_glyphs() {
        let mut op = ada();
        assert_eq!(op.avatar_kind(), AvatarKind::Glyph("🧠".to_string()));
        op.avatar = "https://example.com/a.png".to_string();
        assert!(matches!(op.avatar_kind(), AvatarKind::Image(_)));
        op.avatar = "  ".to_string();
        assert_eq!(op.avatar_kind(), AvatarKind::Glyph("A".to_string()));
    }

    #[test]
    fn blank_base_folder_counts_as_missing() {
        let project = Project {
            id: 1,
            name: "p".to_string(),
            base_folder: Some("  ".to_string()),
        };
        assert_eq!(project.base_folder(), None);
    }

    #[test]
    fn dir_entry_uses_camel_case_from_host() {
        let entry: DirEntry =
            serde_json::from_str(r#"{"name":"src","path":"/p/src","isDirectory":true}"#).unwrap();
        assert!(entry.is_directory);
    }

    #[test]
    fn file_node_has_no_children() {
        let node = FileTreeNode::file("a.txt", "/a.txt");
        assert!(!node.is_folder());
        assert!(node.children.is_none());
        assert_eq!(node.file_count(), 1);
    }

    #[test]
    fn folder_file_count_sums_loaded_children() {
        let node = FileTreeNode::folder(
            "src",
            "/src",
            Some(vec![
                FileTreeNode::file("a.rs", "/src/a.rs"),
                FileTreeNode::folder("empty", "/src/empty", Some(vec![])),
                FileTreeNode::folder("node_modules", "/src/node_modules", None),
            ]),
        );
        assert_eq!(node.file_count(), 1);
    }

    #[test]
    fn content_kind_by_extension() {
        for path in ["photo.png", "a/b.JPG", "x.jpeg", "y.gif", "icon.svg", "z.webp"] {
            assert_eq!(detect_content_kind(path), ContentKind::Image, "{}", path);
        }
        for path in ["main.rs", "README", "archive.tar.gz", "", "weird."] {
            assert_eq!(detect_content_kind(path), ContentKind::Text, "{}", path);
        }
    }

    #[test]
    fn image_media_type_maps_svg_specially() {
        assert_eq!(image_media_type("svg"), "image/svg+xml");
        assert_eq!(image_media_type("png"), "image/png");
        assert_eq!(image_media_type("jpg"), "image/jpg");
    }

    #[test]
    fn language_mapping_is_total() {
        assert_eq!(language_for_path(""), "text");
        assert_eq!(language_for_path("notes.unknownext"), "text");
        assert_eq!(language_for_path("no_extension"), "text");
        assert_eq!(language_for_path("."), "text");
        assert_eq!(language_for_path("src/main.rs"), "rust");
        assert_eq!(language_for_path("C:\\proj\\App.TSX"), "typescript");
        assert_eq!(language_for_path("/repo/Dockerfile"), "dockerfile");
        assert_eq!(language_for_path("config.yml"), "yaml");
    }

    #[test]
    fn file_extension_uses_last_segment_only() {
        assert_eq!(file_extension("/a.b/c"), None);
        assert_eq!(file_extension("/a/.gitignore"), Some("gitignore".to_string()));
        assert_eq!(file_extension("x.tar.GZ"), Some("gz".to_string()));
    }

    #[test]
    fn tray_mode_selection() {
        assert_eq!(TrayMode::select(true, 3), TrayMode::Loading);
        assert_eq!(TrayMode::select(false, 0), TrayMode::Empty);
        assert_eq!(TrayMode::select(false, 2), TrayMode::Populated);
    }

    #[test]
    fn sidebar_mode_selection() {
        assert_eq!(SidebarMode::select(true, true, 0), SidebarMode::Spinner);
        assert_eq!(SidebarMode::select(false, true, 0), SidebarMode::Error);
        assert_eq!(SidebarMode::select(false, false, 4), SidebarMode::Tree);
        assert_eq!(SidebarMode::select(false, false, 0), SidebarMode::NoFiles);
    }

    #[test]
    fn pane_mode_selection() {
        assert_eq!(PaneMode::select(false, true), PaneMode::NothingSelected);
        assert_eq!(PaneMode::select(true, true), PaneMode::ImagePreview);
        assert_eq!(PaneMode::select(true, false), PaneMode::TextViewer);
    }

    #[test]
    fn operator_list_keeps_previous_on_failure() {
        let mut state = OperatorListState::default();
        state.begin();
        state.apply(Ok(vec![ada()]));
        state.begin();
        assert_eq!(state.mode(), TrayMode::Loading);
        state.apply(Err(BridgeError::Unavailable("hostBridge".to_string())));
        assert!(!state.loading);
        assert_eq!(state.operators, vec![ada()]);
        assert_eq!(state.mode(), TrayMode::Populated);
    }

    #[test]
    fn tree_state_error_clears_nodes() {
        let mut state = TreeState::default();
        state.begin();
        state.apply(Err(WorkspaceError::MissingBaseFolder));
        assert_eq!(state.mode(), SidebarMode::Error);
        assert!(state.nodes.is_empty());

        state.begin();
        assert_eq!(state.error, None);
        state.apply(Ok(vec![FileTreeNode::file("a", "/a")]));
        assert_eq!(state.mode(), SidebarMode::Tree);
    }

    #[test]
    fn file_view_begin_clears_stale_content() {
        let mut state = FileViewState::default();
        state.begin("/a.rs");
        state.apply(Ok(FileContent::Text {
            text: "fn main() {}".to_string(),
            language: "rust",
        }));
        state.begin("/b.rs");
        assert_eq!(state.selected_path.as_deref(), Some("/b.rs"));
        assert!(state.content.is_none());
        assert!(state.loading);
    }

    #[test]
    fn file_view_failure_keeps_path_label() {
        let mut state = FileViewState::default();
        state.begin("/missing.txt");
        state.apply(Err(WorkspaceError::Bridge(BridgeError::Call {
            method: "fs.stat",
            message: "not found".to_string(),
        })));
        assert_eq!(state.selected_path.as_deref(), Some("/missing.txt"));
        assert!(state.content.is_none());
        assert!(state.error.is_some());
        assert!(!state.loading);
        assert_eq!(state.mode(), PaneMode::TextViewer);
    }
}
