//! ファイルツリー（サイドバー）

use leptos::*;

use crate::models::{detect_content_kind, ContentKind, FileTreeNode, SidebarMode, TreeState};

const INDENT_BASE_PX: usize = 8;
const INDENT_STEP_PX: usize = 14;

fn indent_style(depth: usize) -> String {
    format!("padding-left: {}px", INDENT_BASE_PX + depth * INDENT_STEP_PX)
}

/// ファイル種別アイコン
fn file_icon(name: &str) -> &'static str {
    match detect_content_kind(name) {
        ContentKind::Image => "🖼",
        ContentKind::Text => "📄",
    }
}

/// ツリーの1ノードを描画（フォルダは再帰、初期状態は折りたたみ）
fn render_tree_node(
    node: FileTreeNode,
    depth: usize,
    selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> View {
    if !node.is_folder() {
        let path = node.path.clone();
        let path_for_class = node.path.clone();
        let is_selected = move || selected.with(|s| s.as_deref() == Some(path_for_class.as_str()));
        return view! {
            <div
                class=move || format!("tree-row file-row {}", if is_selected() { "selected" } else { "" })
                style=indent_style(depth)
                title=node.path.clone()
                on:click=move |_| on_select.call(path.clone())
            >
                <span class="tree-icon">{file_icon(&node.name)}</span>
                <span class="tree-name">{node.name.clone()}</span>
            </div>
        }
        .into_view();
    }

    let (expanded, set_expanded) = create_signal(false);
    // children == None は展開対象外（隠しフォルダ・依存キャッシュ）
    let expandable = node.children.is_some();
    let children = node.children.unwrap_or_default();

    let on_toggle = move |_: web_sys::MouseEvent| {
        if expandable {
            set_expanded.update(|e| *e = !*e);
        }
    };

    view! {
        <div class="tree-node folder">
            <div
                class=format!("tree-row folder-row {}", if expandable { "" } else { "unexpanded" })
                style=indent_style(depth)
                title=node.path.clone()
                on:click=on_toggle
            >
                <span class="tree-chevron">
                    {move || if !expandable { "·" } else if expanded.get() { "▾" } else { "▸" }}
                </span>
                <span class="tree-icon">"📁"</span>
                <span class="tree-name">{node.name.clone()}</span>
            </div>
            {move || expanded.get().then(|| {
                if children.is_empty() {
                    view! {
                        <div class="tree-empty" style=indent_style(depth + 1)>"(空)"</div>
                    }.into_view()
                } else {
                    children
                        .clone()
                        .into_iter()
                        .map(|child| render_tree_node(child, depth + 1, selected, on_select))
                        .collect_view()
                }
            })}
        </div>
    }
    .into_view()
}

/// サイドバー: 読込中 / エラー / ツリー / ファイルなし
#[component]
pub fn FileTreePanel(
    state: ReadSignal<TreeState>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="workspace-sidebar">
            {move || match state.with(TreeState::mode) {
                SidebarMode::Spinner => view! {
                    <div class="sidebar-loading">
                        <span class="spinner"></span>
                        "読込中..."
                    </div>
                }.into_view(),
                SidebarMode::Error => view! {
                    <div class="sidebar-error">
                        <p class="status error">{state.with(|s| s.error.clone().unwrap_or_default())}</p>
                    </div>
                }.into_view(),
                SidebarMode::Tree => state
                    .with(|s| s.nodes.clone())
                    .into_iter()
                    .map(|node| render_tree_node(node, 0, selected, on_select))
                    .collect_view(),
                SidebarMode::NoFiles => view! {
                    <div class="sidebar-empty">"ファイルがありません"</div>
                }.into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_grows_per_level() {
        assert_eq!(indent_style(0), "padding-left: 8px");
        assert_eq!(indent_style(2), "padding-left: 36px");
    }

    #[test]
    fn image_files_get_picture_icon() {
        assert_eq!(file_icon("logo.svg"), "🖼");
        assert_eq!(file_icon("Cargo.toml"), "📄");
    }
}
