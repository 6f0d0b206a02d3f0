//! ワークスペースのファイルツリー構築

use std::cmp::Ordering;

use futures::future::LocalBoxFuture;

use crate::error::WorkspaceError;
use crate::models::{DirEntry, FileTreeNode};
use crate::utils::config::TreeOptions;
use crate::utils::host::HostBridge;
use crate::utils::log_trace::{log_info, log_warn};

/// 大文字小文字を区別しつつ辞書順に比較（同じ綴りなら小文字が先）
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// フォルダを先、ファイルを後にして、それぞれ名前順に並べる
pub fn sort_entries(mut entries: Vec<DirEntry>) -> Vec<DirEntry> {
    entries.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    entries
}

/// `path` 以下のツリーを構築する
///
/// `depth` が `opts.max_depth` に達したら読み込まずに空を返す。
/// 1つのディレクトリの読み込み失敗はそのノードだけ空にして続行する。
pub fn build_tree<'a>(
    bridge: &'a dyn HostBridge,
    path: &'a str,
    depth: usize,
    opts: &'a TreeOptions,
) -> LocalBoxFuture<'a, Vec<FileTreeNode>> {
    Box::pin(async move {
        if depth >= opts.max_depth {
            return Vec::new();
        }

        let entries = match bridge.read_dir(path).await {
            Ok(entries) => entries,
            Err(e) => {
                log_warn("workspace-tree", &format!("{} を読み込めません: {}", path, e));
                return Vec::new();
            }
        };

        let mut nodes = Vec::with_capacity(entries.len());
        for entry in sort_entries(entries) {
            if !entry.is_directory {
                nodes.push(FileTreeNode::file(entry.name, entry.path));
                continue;
            }

            // 隠しフォルダと依存キャッシュは展開しない
            let children = if opts.should_expand(&entry.name) {
                Some(build_tree(bridge, &entry.path, depth + 1, opts).await)
            } else {
                None
            };
            nodes.push(FileTreeNode::folder(entry.name, entry.path, children));
        }
        nodes
    })
}

/// 作業フォルダのツリーを読み込む（未設定ならファイル操作をせずにエラー）
pub async fn load_workspace_tree(
    bridge: &dyn HostBridge,
    base_folder: Option<&str>,
    opts: &TreeOptions,
) -> Result<Vec<FileTreeNode>, WorkspaceError> {
    let root = base_folder.ok_or(WorkspaceError::MissingBaseFolder)?;
    let nodes = build_tree(bridge, root, 0, opts).await;
    let files: usize = nodes.iter().map(FileTreeNode::file_count).sum();
    log_info(
        "workspace-tree",
        &format!("{} を読み込みました（{}項目、ファイル{}件）", root, nodes.len(), files),
    );
    Ok(nodes)
}
